//! Keyframe list sources.
//!
//! Keyframe extraction itself happens outside this crate. Two sources are
//! provided:
//! - [`FfprobeKeyframeReader`] reads the packet listing produced by
//!   `ffprobe -select_streams v:0 -show_entries packet=pts_time,flags -of csv`,
//!   optionally Brotli-compressed (`.br`)
//! - [`VirtualKeyframeSource`] generates a reproducible list for demos and tests

use std::fs::File;
use std::io::{BufRead, BufReader, Read};

use anyhow::{anyhow, Context, Result};
use brotli::Decompressor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::keyframes::Keyframe;

/// Keyframes read from a source, plus the media duration when the source knows it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyframeList {
    pub keyframes: Vec<Keyframe>,
    /// Media duration in milliseconds
    pub duration: Option<i64>,
}

/// Trait for anything that can produce a keyframe list.
///
/// Implementations are called from a background thread, so they must be `Send`.
pub trait KeyframeSource: Send {
    /// Reads keyframes; `path` may be ignored by sources that do not read files.
    fn read(&self, path: &str) -> Result<KeyframeList>;
}

/// Reads ffprobe CSV packet listings.
#[derive(Debug, Default, Clone, Copy)]
pub struct FfprobeKeyframeReader;

impl FfprobeKeyframeReader {
    pub fn new() -> Self {
        Self
    }

    /// Parses a packet listing from any reader.
    ///
    /// Accepts lines with and without the leading `packet` section name
    /// (`packet,1.001000,K__` or `1.001000,K__`). Packets without a
    /// timestamp (`N/A`) are skipped. Blank lines and `#` comments are ignored.
    pub fn parse(&self, reader: impl BufRead) -> Result<KeyframeList> {
        let mut keyframes = Vec::new();
        let mut last_pts: Option<i64> = None;

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result.with_context(|| format!("Failed to read line {}", line_num + 1))?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split(',').map(str::trim).peekable();
            if fields.peek() == Some(&"packet") {
                fields.next();
            }
            let pts_field = fields
                .next()
                .ok_or_else(|| anyhow!("Missing pts_time on line {}", line_num + 1))?;
            let flags = fields.next().unwrap_or("");

            if pts_field == "N/A" {
                continue;
            }
            let seconds: f64 = pts_field
                .parse()
                .with_context(|| format!("Invalid pts_time '{}' on line {}", pts_field, line_num + 1))?;
            let position = (seconds * 1000.0).round() as i64;

            last_pts = Some(last_pts.map_or(position, |last| last.max(position)));
            if flags.contains('K') {
                keyframes.push(Keyframe::new(position));
            }
        }

        keyframes.sort_unstable();
        keyframes.dedup();
        Ok(KeyframeList {
            keyframes,
            duration: last_pts,
        })
    }
}

impl KeyframeSource for FfprobeKeyframeReader {
    fn read(&self, path: &str) -> Result<KeyframeList> {
        let file = File::open(path).with_context(|| format!("Failed to open file: {}", path))?;

        let reader: Box<dyn Read> = if path.ends_with(".br") {
            Box::new(Decompressor::new(file, 4096))
        } else {
            Box::new(file)
        };
        self.parse(BufReader::new(reader))
            .with_context(|| format!("Failed to parse keyframe list: {}", path))
    }
}

const DEFAULT_VIRTUAL_DURATION_MS: i64 = 10 * 60 * 1000;
const DEFAULT_GOP_MS: i64 = 2000;

/// Generates keyframes at a fixed group-of-pictures interval with seeded jitter.
#[derive(Debug, Clone)]
pub struct VirtualKeyframeSource {
    duration: i64,
    gop: i64,
    seed: u64,
}

impl Default for VirtualKeyframeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualKeyframeSource {
    pub fn new() -> Self {
        Self {
            duration: DEFAULT_VIRTUAL_DURATION_MS,
            gop: DEFAULT_GOP_MS,
            seed: 42, // Default seed for reproducibility
        }
    }

    pub fn with_config(duration: i64, gop: i64, seed: u64) -> Self {
        Self {
            duration: duration.max(0),
            gop: gop.max(1),
            seed,
        }
    }

    pub fn duration(&self) -> i64 {
        self.duration
    }
}

impl KeyframeSource for VirtualKeyframeSource {
    fn read(&self, _path: &str) -> Result<KeyframeList> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let jitter = self.gop / 4;

        let mut keyframes = vec![Keyframe::new(0)];
        let mut position = 0;
        loop {
            position += self.gop + rng.gen_range(-jitter..=jitter);
            if position >= self.duration {
                break;
            }
            keyframes.push(Keyframe::new(position));
        }

        Ok(KeyframeList {
            keyframes,
            duration: Some(self.duration),
        })
    }
}
