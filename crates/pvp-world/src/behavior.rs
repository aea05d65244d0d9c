//! Per-animal decision procedure.
//!
//! Every animal runs the same state machine once per tick. The only
//! species-specific step is the predator's eat check, which comes first
//! and ends the turn when it fires.

use crate::grid::{Grid, Survey};
use pvp_core::{Error, Position, Result, Species};
use rand::seq::SliceRandom;
use rand::Rng;

/// The single state change an animal makes on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Step onto a neighboring prey, consuming it
    Eat { prey: Position },
    /// Place an offspring on a vacant neighbor
    Breed { at: Position },
    Move { to: Position },
    Idle,
}

/// Whether a breed-ready animal may breed given its surroundings.
///
/// An adjacent predator blocks breeding; the animal moves away instead.
pub fn breeding_permitted(survey: &Survey) -> bool {
    survey.preds.is_empty() && !survey.vacant.is_empty()
}

/// Pick an action from a survey, without touching the grid
pub fn decide<R: Rng + ?Sized>(
    species: Species,
    breed_ready: bool,
    survey: &Survey,
    rng: &mut R,
) -> Action {
    if species == Species::Predator {
        if let Some(&prey) = survey.preys.first() {
            return Action::Eat { prey };
        }
    }

    let Some(&target) = survey.vacant.choose(rng) else {
        return Action::Idle;
    };

    if breed_ready && breeding_permitted(survey) {
        Action::Breed { at: target }
    } else {
        Action::Move { to: target }
    }
}

/// Carry out an action for the animal at `at`
pub fn apply(grid: &mut Grid, at: Position, action: Action) -> Result<()> {
    match action {
        Action::Eat { prey } => {
            match grid.species_at(prey) {
                Some(Species::Prey) => {}
                Some(Species::Predator) => return Err(Error::CellOccupied(prey)),
                None => return Err(Error::CellVacant(prey)),
            }
            grid.remove(prey)?;
            grid.move_animal(at, prey)?;
            if let Some(predator) = grid.get_mut(prey) {
                predator.feed();
            }
        }
        Action::Breed { at: target } => {
            grid.spawn(at, target)?;
        }
        Action::Move { to } => {
            grid.move_animal(at, to)?;
        }
        Action::Idle => {}
    }

    Ok(())
}

/// Survey, decide and apply in one turn for the animal at `at`
pub fn act<R: Rng + ?Sized>(
    grid: &mut Grid,
    at: Position,
    breed_ready: bool,
    rng: &mut R,
) -> Result<Action> {
    let species = grid.species_at(at).ok_or(Error::CellVacant(at))?;
    let survey = grid.survey(at);
    let action = decide(species, breed_ready, &survey, rng);
    apply(grid, at, action)?;
    Ok(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pvp_core::{BREED_INTERVAL, MAX_HUNGER};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn survey(preys: &[(i32, i32)], preds: &[(i32, i32)], vacant: &[(i32, i32)]) -> Survey {
        let to_positions = |cells: &[(i32, i32)]| -> Vec<Position> {
            cells.iter().map(|&(x, y)| Position::new(x, y)).collect()
        };
        Survey {
            preys: to_positions(preys),
            preds: to_positions(preds),
            vacant: to_positions(vacant),
        }
    }

    #[test]
    fn test_breeding_permitted() {
        assert!(breeding_permitted(&survey(&[], &[], &[(0, 1)])));
        assert!(breeding_permitted(&survey(&[(1, 0)], &[], &[(0, 1)])));
        assert!(!breeding_permitted(&survey(&[], &[(1, 1)], &[(0, 1)])));
        assert!(!breeding_permitted(&survey(&[], &[], &[])));
    }

    #[test]
    fn test_predator_eats_first_prey() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let options = survey(&[(0, 1), (2, 2)], &[], &[(1, 0)]);

        let action = decide(Species::Predator, true, &options, &mut rng);
        assert_eq!(action, Action::Eat { prey: Position::new(0, 1) });
    }

    #[test]
    fn test_prey_ignores_prey_neighbors() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let options = survey(&[(0, 1)], &[], &[(1, 0)]);

        let action = decide(Species::Prey, false, &options, &mut rng);
        assert_eq!(action, Action::Move { to: Position::new(1, 0) });
    }

    #[test]
    fn test_ready_animal_breeds_when_unthreatened() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let options = survey(&[], &[], &[(1, 0), (1, 2)]);

        for species in [Species::Predator, Species::Prey] {
            match decide(species, true, &options, &mut rng) {
                Action::Breed { at } => assert!(options.vacant.contains(&at)),
                other => panic!("expected breed, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_adjacent_predator_turns_breed_into_move() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let options = survey(&[], &[(0, 0)], &[(1, 0), (1, 2)]);

        match decide(Species::Prey, true, &options, &mut rng) {
            Action::Move { to } => assert!(options.vacant.contains(&to)),
            other => panic!("expected move, got {:?}", other),
        }
    }

    #[test]
    fn test_no_vacancy_means_idle() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let options = survey(&[], &[(0, 0)], &[]);

        assert_eq!(decide(Species::Prey, true, &options, &mut rng), Action::Idle);
        assert_eq!(decide(Species::Predator, false, &options, &mut rng), Action::Idle);
    }

    #[test]
    fn test_random_targets_cover_all_vacancies() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let options = survey(&[], &[], &[(0, 0), (0, 1), (0, 2)]);

        let mut hits = [false; 3];
        for _ in 0..200 {
            if let Action::Move { to } = decide(Species::Prey, false, &options, &mut rng) {
                hits[to.y as usize] = true;
            }
        }
        assert!(hits.iter().all(|&hit| hit));
    }

    #[test]
    fn test_act_eat_moves_predator_and_feeds() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut grid = Grid::new(3).unwrap();
        grid.insert(Species::Predator, Position::new(1, 1)).unwrap();
        grid.insert(Species::Prey, Position::new(1, 2)).unwrap();
        grid.get_mut(Position::new(1, 1)).unwrap().hunger = Some(2);

        let action = act(&mut grid, Position::new(1, 1), false, &mut rng).unwrap();

        assert_eq!(action, Action::Eat { prey: Position::new(1, 2) });
        assert!(grid.is_vacant(Position::new(1, 1)));
        let predator = grid.get(Position::new(1, 2)).unwrap();
        assert_eq!(predator.species, Species::Predator);
        assert_eq!(predator.hunger, Some(MAX_HUNGER));
        assert_eq!(grid.counts(), (1, 0));
        grid.check_invariants().unwrap();
    }

    #[test]
    fn test_act_breed_places_offspring() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut grid = Grid::new(2).unwrap();
        grid.insert(Species::Prey, Position::new(0, 0)).unwrap();
        grid.get_mut(Position::new(0, 0)).unwrap().breed_clock = 0;

        let action = act(&mut grid, Position::new(0, 0), true, &mut rng).unwrap();

        assert!(matches!(action, Action::Breed { .. }));
        assert_eq!(grid.counts(), (0, 2));
        assert_eq!(grid.get(Position::new(0, 0)).unwrap().breed_clock, BREED_INTERVAL);
        grid.check_invariants().unwrap();
    }

    #[test]
    fn test_apply_rejects_stale_targets() {
        let mut grid = Grid::new(3).unwrap();
        grid.insert(Species::Predator, Position::new(0, 0)).unwrap();
        grid.insert(Species::Predator, Position::new(0, 1)).unwrap();

        let stale_move = apply(&mut grid, Position::new(0, 0), Action::Move { to: Position::new(0, 1) });
        assert!(matches!(stale_move, Err(Error::CellOccupied(_))));

        let stale_eat = apply(&mut grid, Position::new(0, 0), Action::Eat { prey: Position::new(1, 1) });
        assert!(matches!(stale_eat, Err(Error::CellVacant(_))));

        let outside = apply(&mut grid, Position::new(0, 0), Action::Breed { at: Position::new(-1, 0) });
        assert!(matches!(outside, Err(Error::OutOfBounds(_))));

        assert_eq!(grid.counts(), (2, 0));
        grid.check_invariants().unwrap();
    }
}
