/*!
Line-encoding schemes.

Each scheme is a small finite-state transducer over the bit sequence. The
state it carries between bits (previous bit, current level or last mark
polarity) lives in an explicit accumulator that is folded over the bits, so
every encoder is a pure function of its input.

The `transition` flag on a [`Segment`] is the encoder's view of a bit
boundary. It is deliberately coarser than the vertical jumps the renderer
finally draws; see [`crate::render::plot_points`].
*/

use crate::bits::{Bit, BitSequence};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Signal amplitude class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
#[repr(i8)]
pub enum Level {
    Low = -1,
    Zero = 0,
    High = 1,
}

impl Level {
    /// Numeric value in {-1, 0, +1}
    pub fn value(self) -> i8 {
        self as i8
    }

    /// Opposite polarity; `Zero` stays `Zero`
    pub fn inverted(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::Zero => Self::Zero,
            Self::High => Self::Low,
        }
    }

    /// Label drawn on the vertical axis
    pub fn axis_label(self) -> &'static str {
        match self {
            Self::High => "+V",
            Self::Zero => "0",
            Self::Low => "-V",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => f.write_str("+1"),
            Self::Zero => f.write_str("0"),
            Self::Low => f.write_str("-1"),
        }
    }
}

impl From<Level> for i8 {
    fn from(level: Level) -> Self {
        level.value()
    }
}

impl TryFrom<i8> for Level {
    type Error = String;

    fn try_from(value: i8) -> std::result::Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Low),
            0 => Ok(Self::Zero),
            1 => Ok(Self::High),
            other => Err(format!("level out of range: {}", other)),
        }
    }
}

/// Half of a bit period, used by the Manchester family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Half {
    First,
    Second,
}

impl Half {
    pub fn index(self) -> u8 {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

impl From<Half> for u8 {
    fn from(half: Half) -> Self {
        half.index()
    }
}

impl TryFrom<u8> for Half {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::First),
            1 => Ok(Self::Second),
            other => Err(format!("half index out of range: {}", other)),
        }
    }
}

/// One output unit of an encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub bit_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half: Option<Half>,
    pub level: Level,
    pub transition: bool,
}

impl Segment {
    /// Segment spanning a whole bit period
    pub fn full(bit_index: usize, level: Level, transition: bool) -> Self {
        Self { bit_index, half: None, level, transition }
    }

    /// Segment spanning one half of a bit period
    pub fn half(bit_index: usize, half: Half, level: Level, transition: bool) -> Self {
        Self { bit_index, half: Some(half), level, transition }
    }
}

/// The six supported line-encoding schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheme {
    #[serde(rename = "nrzl")]
    Nrzl,
    #[serde(rename = "nrzi")]
    Nrzi,
    #[serde(rename = "ami")]
    Ami,
    #[serde(rename = "pseudo")]
    Pseudoternary,
    #[serde(rename = "manchester")]
    Manchester,
    #[serde(rename = "diffmanchester")]
    DifferentialManchester,
}

impl Scheme {
    /// All schemes in display order
    pub const ALL: [Scheme; 6] = [
        Scheme::Nrzl,
        Scheme::Nrzi,
        Scheme::Ami,
        Scheme::Pseudoternary,
        Scheme::Manchester,
        Scheme::DifferentialManchester,
    ];

    /// Look up a scheme by its selector. Unknown selectors yield `None`.
    pub fn from_selector(s: &str) -> Option<Self> {
        match s {
            "nrzl" => Some(Self::Nrzl),
            "nrzi" => Some(Self::Nrzi),
            "ami" => Some(Self::Ami),
            "pseudo" => Some(Self::Pseudoternary),
            "manchester" => Some(Self::Manchester),
            "diffmanchester" => Some(Self::DifferentialManchester),
            _ => None,
        }
    }

    /// Selector string for this scheme
    pub fn selector(self) -> &'static str {
        match self {
            Self::Nrzl => "nrzl",
            Self::Nrzi => "nrzi",
            Self::Ami => "ami",
            Self::Pseudoternary => "pseudo",
            Self::Manchester => "manchester",
            Self::DifferentialManchester => "diffmanchester",
        }
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Self::Nrzl => "NRZ-L",
            Self::Nrzi => "NRZI",
            Self::Ami => "AMI",
            Self::Pseudoternary => "Pseudoternary",
            Self::Manchester => "Manchester",
            Self::DifferentialManchester => "Differential Manchester",
        }
    }

    /// Short description of the encoding rule
    pub fn rule(self) -> &'static str {
        match self {
            Self::Nrzl => "1 = high, 0 = low",
            Self::Nrzi => "1 = invert level, 0 = hold",
            Self::Ami => "0 = zero, 1 = alternating +V/-V",
            Self::Pseudoternary => "1 = zero, 0 = alternating +V/-V",
            Self::Manchester => "1 = low-to-high, 0 = high-to-low (G.E. Thomas)",
            Self::DifferentialManchester => "0 = transition at start, always a mid-bit transition",
        }
    }

    /// True for schemes that emit two half-bit segments per bit
    pub fn is_half_bit(self) -> bool {
        matches!(self, Self::Manchester | Self::DifferentialManchester)
    }

    /// Number of segments emitted per input bit
    pub fn segments_per_bit(self) -> usize {
        if self.is_half_bit() {
            2
        } else {
            1
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output of one encoder run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedSignal {
    pub scheme: Scheme,
    pub bits: BitSequence,
    pub segments: Vec<Segment>,
}

impl EncodedSignal {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn levels(&self) -> Vec<Level> {
        self.segments.iter().map(|s| s.level).collect()
    }

    pub fn transitions(&self) -> Vec<bool> {
        self.segments.iter().map(|s| s.transition).collect()
    }

    /// Serialize the signal as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Per-bit step of a scheme's state machine
trait Transducer {
    fn step(&mut self, index: usize, bit: Bit, out: &mut Vec<Segment>);
}

fn run<T: Transducer>(bits: &BitSequence, state: T, segments_per_bit: usize) -> Vec<Segment> {
    let (_, segments) = bits.iter().enumerate().fold(
        (state, Vec::with_capacity(bits.len() * segments_per_bit)),
        |(mut state, mut out), (index, bit)| {
            state.step(index, bit, &mut out);
            (state, out)
        },
    );
    segments
}

/// NRZ-L: remembers the previous bit to flag level changes
struct NrzlState {
    previous: Option<Bit>,
}

impl Transducer for NrzlState {
    fn step(&mut self, index: usize, bit: Bit, out: &mut Vec<Segment>) {
        let level = if bit.is_one() { Level::High } else { Level::Low };
        let transition = self.previous.is_some_and(|prev| prev != bit);
        out.push(Segment::full(index, level, transition));
        self.previous = Some(bit);
    }
}

/// NRZI: a one inverts the current level
struct NrziState {
    level: Level,
}

impl Transducer for NrziState {
    fn step(&mut self, index: usize, bit: Bit, out: &mut Vec<Segment>) {
        if bit.is_one() {
            self.level = self.level.inverted();
        }
        out.push(Segment::full(index, self.level, bit.is_one()));
    }
}

/// AMI and Pseudoternary: marks alternate polarity, spaces rest at zero
struct AlternateMarkState {
    mark: Bit,
    last_polarity: Level,
}

impl Transducer for AlternateMarkState {
    fn step(&mut self, index: usize, bit: Bit, out: &mut Vec<Segment>) {
        let level = if bit == self.mark {
            self.last_polarity = self.last_polarity.inverted();
            self.last_polarity
        } else {
            Level::Zero
        };
        out.push(Segment::full(index, level, index > 0));
    }
}

/// Manchester: only the previous bit matters, for the boundary flag
struct ManchesterState {
    previous: Option<Bit>,
}

impl Transducer for ManchesterState {
    fn step(&mut self, index: usize, bit: Bit, out: &mut Vec<Segment>) {
        let (first, second) = if bit.is_one() {
            (Level::Low, Level::High)
        } else {
            (Level::High, Level::Low)
        };
        // Equal neighbouring bits meet at opposite levels.
        let at_boundary = self.previous == Some(bit);
        out.push(Segment::half(index, Half::First, first, at_boundary));
        out.push(Segment::half(index, Half::Second, second, true));
        self.previous = Some(bit);
    }
}

/// Differential Manchester: a zero inverts at the start, every bit inverts mid-period
struct DiffManchesterState {
    level: Level,
}

impl Transducer for DiffManchesterState {
    fn step(&mut self, index: usize, bit: Bit, out: &mut Vec<Segment>) {
        let transition_at_start = !bit.is_one();
        if transition_at_start {
            self.level = self.level.inverted();
        }
        out.push(Segment::half(index, Half::First, self.level, transition_at_start));

        self.level = self.level.inverted();
        out.push(Segment::half(index, Half::Second, self.level, true));
    }
}

/// NRZ-L segments
pub fn encode_nrzl(bits: &BitSequence) -> Vec<Segment> {
    run(bits, NrzlState { previous: None }, 1)
}

/// NRZI segments, starting from a low level
pub fn encode_nrzi(bits: &BitSequence) -> Vec<Segment> {
    run(bits, NrziState { level: Level::Low }, 1)
}

/// AMI segments; the first mark is positive
pub fn encode_ami(bits: &BitSequence) -> Vec<Segment> {
    run(bits, AlternateMarkState { mark: Bit::One, last_polarity: Level::Low }, 1)
}

/// Pseudoternary segments; the first zero is positive
pub fn encode_pseudoternary(bits: &BitSequence) -> Vec<Segment> {
    run(bits, AlternateMarkState { mark: Bit::Zero, last_polarity: Level::Low }, 1)
}

/// Manchester (G.E. Thomas) half-bit segments
pub fn encode_manchester(bits: &BitSequence) -> Vec<Segment> {
    run(bits, ManchesterState { previous: None }, 2)
}

/// Differential Manchester half-bit segments, starting from a high level
pub fn encode_differential_manchester(bits: &BitSequence) -> Vec<Segment> {
    run(bits, DiffManchesterState { level: Level::High }, 2)
}

/// Encode `bits` with the given scheme
pub fn encode(scheme: Scheme, bits: &BitSequence) -> EncodedSignal {
    let segments = match scheme {
        Scheme::Nrzl => encode_nrzl(bits),
        Scheme::Nrzi => encode_nrzi(bits),
        Scheme::Ami => encode_ami(bits),
        Scheme::Pseudoternary => encode_pseudoternary(bits),
        Scheme::Manchester => encode_manchester(bits),
        Scheme::DifferentialManchester => encode_differential_manchester(bits),
    };
    trace!(scheme = scheme.selector(), bits = %bits, segments = segments.len(), "encoded");

    EncodedSignal { scheme, bits: bits.clone(), segments }
}
