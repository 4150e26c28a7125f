//! Fields of the Config register and the word they combine into.
//!
//! | Bits  | Field                                  |
//! | :---  | :---                                   |
//! | 15    | Operational status / start single-shot |
//! | 14-12 | Input multiplexer                      |
//! | 11-9  | Programmable gain amplifier            |
//! | 8     | Operating mode                         |
//! | 7-5   | Data rate                              |
//! | 4-0   | Comparator, always disabled here       |

const STATUS_SHIFT: u16 = 15;
const MUX_SHIFT: u16 = 12;
const PGA_SHIFT: u16 = 9;
const MODE_SHIFT: u16 = 8;
const RATE_SHIFT: u16 = 5;

const STATUS_MASK: u16 = 0b1;
const MUX_MASK: u16 = 0b111;
const PGA_MASK: u16 = 0b111;
const MODE_MASK: u16 = 0b1;
const RATE_MASK: u16 = 0b111;

/// Comparator mode, polarity and latch at their defaults, queue disabled.
const COMPARATOR_DISABLED: u16 = 0b0_0011;

/// Input multiplexer selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MuxSelector {
    /// AIN0 relative to AIN1.
    Ain0Ain1 = 0b000,
    /// AIN0 relative to AIN3.
    Ain0Ain3 = 0b001,
    /// AIN1 relative to AIN3.
    Ain1Ain3 = 0b010,
    /// AIN2 relative to AIN3.
    Ain2Ain3 = 0b011,
    /// AIN0 relative to ground.
    Ain0Gnd = 0b100,
    /// AIN1 relative to ground.
    Ain1Gnd = 0b101,
    /// AIN2 relative to ground.
    Ain2Gnd = 0b110,
    /// AIN3 relative to ground.
    Ain3Gnd = 0b111,
}

impl MuxSelector {
    /// Iterate over all selections.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::Ain0Ain1,
            Self::Ain0Ain3,
            Self::Ain1Ain3,
            Self::Ain2Ain3,
            Self::Ain0Gnd,
            Self::Ain1Gnd,
            Self::Ain2Gnd,
            Self::Ain3Gnd,
        ]
        .into_iter()
    }

    fn from_bits(bits: u16) -> Self {
        match bits & MUX_MASK {
            0b000 => Self::Ain0Ain1,
            0b001 => Self::Ain0Ain3,
            0b010 => Self::Ain1Ain3,
            0b011 => Self::Ain2Ain3,
            0b100 => Self::Ain0Gnd,
            0b101 => Self::Ain1Gnd,
            0b110 => Self::Ain2Gnd,
            _ => Self::Ain3Gnd,
        }
    }
}

/// Logical input channel, either single-ended or a differential pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Ain0,
    Ain1,
    Ain2,
    Ain3,
    Diff01,
    Diff03,
    Diff13,
    Diff23,
}

impl Channel {
    /// Iterate over the four single-ended channels.
    pub fn single_ended() -> impl Iterator<Item = Self> {
        [Self::Ain0, Self::Ain1, Self::Ain2, Self::Ain3].into_iter()
    }

    /// The multiplexer setting that samples this channel.
    pub const fn mux(self) -> MuxSelector {
        match self {
            Channel::Ain0 => MuxSelector::Ain0Gnd,
            Channel::Ain1 => MuxSelector::Ain1Gnd,
            Channel::Ain2 => MuxSelector::Ain2Gnd,
            Channel::Ain3 => MuxSelector::Ain3Gnd,
            Channel::Diff01 => MuxSelector::Ain0Ain1,
            Channel::Diff03 => MuxSelector::Ain0Ain3,
            Channel::Diff13 => MuxSelector::Ain1Ain3,
            Channel::Diff23 => MuxSelector::Ain2Ain3,
        }
    }
}

impl From<Channel> for MuxSelector {
    fn from(channel: Channel) -> Self {
        channel.mux()
    }
}

impl From<MuxSelector> for Channel {
    fn from(mux: MuxSelector) -> Self {
        match mux {
            MuxSelector::Ain0Gnd => Channel::Ain0,
            MuxSelector::Ain1Gnd => Channel::Ain1,
            MuxSelector::Ain2Gnd => Channel::Ain2,
            MuxSelector::Ain3Gnd => Channel::Ain3,
            MuxSelector::Ain0Ain1 => Channel::Diff01,
            MuxSelector::Ain0Ain3 => Channel::Diff03,
            MuxSelector::Ain1Ain3 => Channel::Diff13,
            MuxSelector::Ain2Ain3 => Channel::Diff23,
        }
    }
}

/// Full-scale range of the programmable gain amplifier.
#[allow(non_camel_case_types)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GainRange {
    /// ±6.144 V
    PGA_6_144V = 0b000,
    /// ±4.096 V
    PGA_4_096V = 0b001,
    /// ±2.048 V, the power-on default.
    #[default]
    PGA_2_048V = 0b010,
    /// ±1.024 V
    PGA_1_024V = 0b011,
    /// ±0.512 V
    PGA_0_512V = 0b100,
    /// ±0.256 V
    PGA_0_256V = 0b101,
}

impl GainRange {
    /// Iterate over all ranges, widest first.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::PGA_6_144V,
            Self::PGA_4_096V,
            Self::PGA_2_048V,
            Self::PGA_1_024V,
            Self::PGA_0_512V,
            Self::PGA_0_256V,
        ]
        .into_iter()
    }

    /// Input magnitude corresponding to a full-scale code.
    pub const fn full_scale_volts(self) -> f32 {
        match self {
            GainRange::PGA_6_144V => 6.144,
            GainRange::PGA_4_096V => 4.096,
            GainRange::PGA_2_048V => 2.048,
            GainRange::PGA_1_024V => 1.024,
            GainRange::PGA_0_512V => 0.512,
            GainRange::PGA_0_256V => 0.256,
        }
    }

    /// Weight of one least-significant bit, in volts.
    pub fn lsb_volts(self) -> f32 {
        self.full_scale_volts() / 32768.0
    }

    // 0b110 and 0b111 are aliases of the ±0.256 V range.
    fn from_bits(bits: u16) -> Self {
        match bits & PGA_MASK {
            0b000 => Self::PGA_6_144V,
            0b001 => Self::PGA_4_096V,
            0b010 => Self::PGA_2_048V,
            0b011 => Self::PGA_1_024V,
            0b100 => Self::PGA_0_512V,
            _ => Self::PGA_0_256V,
        }
    }
}

/// Conversion rate in samples per second.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DataRate {
    Sps8 = 0b000,
    Sps16 = 0b001,
    Sps32 = 0b010,
    Sps64 = 0b011,
    /// The power-on default.
    #[default]
    Sps128 = 0b100,
    Sps250 = 0b101,
    Sps475 = 0b110,
    Sps860 = 0b111,
}

impl DataRate {
    /// Iterate over all rates, slowest first.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::Sps8,
            Self::Sps16,
            Self::Sps32,
            Self::Sps64,
            Self::Sps128,
            Self::Sps250,
            Self::Sps475,
            Self::Sps860,
        ]
        .into_iter()
    }

    pub const fn samples_per_second(self) -> u16 {
        match self {
            DataRate::Sps8 => 8,
            DataRate::Sps16 => 16,
            DataRate::Sps32 => 32,
            DataRate::Sps64 => 64,
            DataRate::Sps128 => 128,
            DataRate::Sps250 => 250,
            DataRate::Sps475 => 475,
            DataRate::Sps860 => 860,
        }
    }

    /// Nominal duration of one conversion in microseconds, rounded up.
    ///
    /// This is the lower bound on how long a single-shot conversion takes.
    pub const fn conversion_time_us(self) -> u32 {
        match self {
            DataRate::Sps8 => 125_000,
            DataRate::Sps16 => 62_500,
            DataRate::Sps32 => 31_250,
            DataRate::Sps64 => 15_625,
            DataRate::Sps128 => 7_813,
            DataRate::Sps250 => 4_000,
            DataRate::Sps475 => 2_106,
            DataRate::Sps860 => 1_163,
        }
    }

    fn from_bits(bits: u16) -> Self {
        match bits & RATE_MASK {
            0b000 => Self::Sps8,
            0b001 => Self::Sps16,
            0b010 => Self::Sps32,
            0b011 => Self::Sps64,
            0b100 => Self::Sps128,
            0b101 => Self::Sps250,
            0b110 => Self::Sps475,
            _ => Self::Sps860,
        }
    }
}

/// Device operating mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    /// Convert back to back.
    Continuous = 0,
    /// Convert once when triggered, then power down.
    #[default]
    SingleShot = 1,
}

/// A 16-bit Config register value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigWord(u16);

impl ConfigWord {
    /// Value of the Config register after power-on reset.
    pub const RESET: ConfigWord = ConfigWord(0x8583);

    /// Combine the fields into a Config word. The comparator is left disabled.
    ///
    /// # Args
    /// * `start` - Set the status bit, which starts a conversion when in single-shot mode.
    pub fn build(mux: MuxSelector, gain: GainRange, rate: DataRate, mode: Mode, start: bool) -> Self {
        let mut word = COMPARATOR_DISABLED;

        word |= (start as u16) << STATUS_SHIFT;
        word |= (mux as u16) << MUX_SHIFT;
        word |= (gain as u16) << PGA_SHIFT;
        word |= (mode as u16) << MODE_SHIFT;
        word |= (rate as u16) << RATE_SHIFT;

        ConfigWord(word)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub fn mux(self) -> MuxSelector {
        MuxSelector::from_bits(self.0 >> MUX_SHIFT)
    }

    pub fn gain(self) -> GainRange {
        GainRange::from_bits(self.0 >> PGA_SHIFT)
    }

    pub fn data_rate(self) -> DataRate {
        DataRate::from_bits(self.0 >> RATE_SHIFT)
    }

    pub fn mode(self) -> Mode {
        if (self.0 >> MODE_SHIFT) & MODE_MASK == 0 {
            Mode::Continuous
        } else {
            Mode::SingleShot
        }
    }

    /// The status bit. When written it requests a conversion; when read back
    /// it is set while the device is idle.
    pub fn status(self) -> bool {
        (self.0 >> STATUS_SHIFT) & STATUS_MASK == 1
    }

    /// Whether a word read back from the device reports no conversion in progress.
    pub fn is_ready(self) -> bool {
        self.status()
    }

    /// The comparator bits, always the disabled pattern for words built here.
    pub fn comparator(self) -> u16 {
        self.0 & 0b1_1111
    }
}

impl From<u16> for ConfigWord {
    fn from(bits: u16) -> Self {
        ConfigWord(bits)
    }
}

impl From<ConfigWord> for u16 {
    fn from(word: ConfigWord) -> Self {
        word.0
    }
}
