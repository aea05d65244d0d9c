//! Frame output for snapshots.

use anyhow::Result;
use pvp_core::{OutputFormat, RunnerConfig};
use pvp_world::Snapshot;
use std::io::Write;
use std::thread;
use std::time::Duration;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// Writes one frame per snapshot, pausing between frames
pub struct FramePrinter<W: Write> {
    out: W,
    config: RunnerConfig,
    frames: u64,
}

impl<W: Write> FramePrinter<W> {
    pub fn new(out: W, config: RunnerConfig) -> Self {
        Self {
            out,
            config,
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn show(&mut self, snapshot: &Snapshot) -> Result<()> {
        if self.frames > 0 && self.config.frame_delay_ms > 0 {
            thread::sleep(Duration::from_millis(self.config.frame_delay_ms));
        }

        match self.config.output {
            OutputFormat::Text => {
                if self.config.clear_screen {
                    write!(self.out, "{}", CLEAR_SCREEN)?;
                }
                writeln!(self.out, "{}", snapshot)?;
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, snapshot)?;
                writeln!(self.out)?;
            }
        }

        self.out.flush()?;
        self.frames += 1;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
