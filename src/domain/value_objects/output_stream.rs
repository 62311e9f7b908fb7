//! Output streams a session can echo or hide

use std::fmt;

/// One kind of session output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputStream {
    /// Command standard output
    Stdout,
    /// Command standard error
    Stderr,
    /// Failures tolerated inside a warn-only scope
    Warnings,
    /// Echo of the command line before it runs
    Running,
}

impl OutputStream {
    pub const ALL: [OutputStream; 4] = [
        OutputStream::Stdout,
        OutputStream::Stderr,
        OutputStream::Warnings,
        OutputStream::Running,
    ];

    fn bit(self) -> u8 {
        match self {
            OutputStream::Stdout => 1,
            OutputStream::Stderr => 1 << 1,
            OutputStream::Warnings => 1 << 2,
            OutputStream::Running => 1 << 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputStream::Stdout => "stdout",
            OutputStream::Stderr => "stderr",
            OutputStream::Warnings => "warnings",
            OutputStream::Running => "running",
        }
    }
}

impl fmt::Display for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A small set of output streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct StreamSet(u8);

impl StreamSet {
    pub const NONE: StreamSet = StreamSet(0);
    pub const ALL: StreamSet = StreamSet(0b1111);

    pub fn of(streams: &[OutputStream]) -> Self {
        streams.iter().fold(Self::NONE, |set, s| set.with(*s))
    }

    pub fn with(self, stream: OutputStream) -> Self {
        StreamSet(self.0 | stream.bit())
    }

    pub fn union(self, other: StreamSet) -> Self {
        StreamSet(self.0 | other.0)
    }

    pub fn contains(self, stream: OutputStream) -> bool {
        self.0 & stream.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}
