//! MIDI message types and value conversions
//!
//! Only the channel messages this controller emits are modelled: Note On
//! and Control Change.

use std::fmt;

/// Outbound MIDI messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessage {
    /// Note On: channel (0-15), note (0-127), velocity (0-127)
    NoteOn { channel: u8, note: u8, velocity: u8 },

    /// Control Change: channel (0-15), cc (0-127), value (0-127)
    ControlChange { channel: u8, cc: u8, value: u8 },
}

impl MidiMessage {
    /// Encode the message to MIDI bytes
    pub fn encode(&self) -> [u8; 3] {
        match *self {
            MidiMessage::NoteOn { channel, note, velocity } => {
                [0x90 | (channel & 0x0F), note & 0x7F, velocity & 0x7F]
            }
            MidiMessage::ControlChange { channel, cc, value } => {
                [0xB0 | (channel & 0x0F), cc & 0x7F, value & 0x7F]
            }
        }
    }

    /// Decode a three-byte Note On or Control Change
    pub fn parse(data: &[u8]) -> Option<Self> {
        let [status, d1, d2] = *data else {
            return None;
        };
        let channel = status & 0x0F;
        let (d1, d2) = (d1 & 0x7F, d2 & 0x7F);

        match status & 0xF0 {
            0x90 => Some(MidiMessage::NoteOn { channel, note: d1, velocity: d2 }),
            0xB0 => Some(MidiMessage::ControlChange { channel, cc: d1, value: d2 }),
            _ => None,
        }
    }
}

impl fmt::Display for MidiMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MidiMessage::NoteOn { channel, note, velocity } => {
                write!(f, "NoteOn ch:{} n:{} v:{}", channel + 1, note, velocity)
            }
            MidiMessage::ControlChange { channel, cc, value } => {
                write!(f, "CC ch:{} cc:{} v:{}", channel + 1, cc, value)
            }
        }
    }
}

/// MIDI value conversion utilities
pub mod convert {
    /// Rescale a slider position in `[min, max]` to a 7-bit value (0-127)
    ///
    /// Rounds half up, so the midpoint of an even span lands on 64. Values
    /// outside the range saturate at the ends and NaN maps to 0.
    pub fn slider_to_cc(raw: f64, min: f64, max: f64) -> u8 {
        let span = max - min;
        if span <= 0.0 || raw.is_nan() {
            return 0;
        }
        let scaled = (raw - min) * 127.0 / span;
        scaled.round().clamp(0.0, 127.0) as u8
    }

    /// Convert 7-bit value to percentage (0-100)
    pub fn to_percent_7bit(value: u8) -> f32 {
        (value.min(127) as f32 * 100.0) / 127.0
    }
}

/// Format MIDI bytes as hex string for debugging
pub fn format_hex(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_note_on() {
        let msg = MidiMessage::NoteOn {
            channel: 0,
            note: 60,
            velocity: 100,
        };

        assert_eq!(msg.encode(), [0x90, 60, 100]);
    }

    #[test]
    fn test_encode_control_change() {
        let msg = MidiMessage::ControlChange {
            channel: 0,
            cc: 1,
            value: 64,
        };

        assert_eq!(msg.encode(), [0xB0, 0x01, 0x40]);
        assert_eq!(format_hex(&msg.encode()), "B0 01 40");
    }

    #[test]
    fn test_encode_masks_out_of_range_bytes() {
        let msg = MidiMessage::ControlChange {
            channel: 0x1F,
            cc: 0x81,
            value: 0xFF,
        };

        assert_eq!(msg.encode(), [0xBF, 0x01, 0x7F]);
    }

    #[test]
    fn test_parse_round_trips_emitted_messages() {
        assert_eq!(
            MidiMessage::parse(&[0x90, 62, 100]),
            Some(MidiMessage::NoteOn {
                channel: 0,
                note: 62,
                velocity: 100,
            })
        );
        assert_eq!(
            MidiMessage::parse(&[0xB0, 1, 32]),
            Some(MidiMessage::ControlChange {
                channel: 0,
                cc: 1,
                value: 32,
            })
        );
    }

    #[test]
    fn test_parse_rejects_other_lengths_and_types() {
        assert_eq!(MidiMessage::parse(&[]), None);
        assert_eq!(MidiMessage::parse(&[0xB0, 1]), None);
        assert_eq!(MidiMessage::parse(&[0xE0, 0x00, 0x40]), None);
        assert_eq!(MidiMessage::parse(&[0x80, 60, 0]), None);
    }

    #[test]
    fn test_display_uses_one_based_channel() {
        let msg = MidiMessage::ControlChange {
            channel: 0,
            cc: 1,
            value: 32,
        };
        assert_eq!(msg.to_string(), "CC ch:1 cc:1 v:32");
    }

    #[test]
    fn test_slider_endpoints() {
        assert_eq!(convert::slider_to_cc(-8.0, -8.0, 8.0), 0);
        assert_eq!(convert::slider_to_cc(8.0, -8.0, 8.0), 127);
    }

    #[test]
    fn test_slider_midpoint_rounds_half_up() {
        // 63.5 -> 64
        assert_eq!(convert::slider_to_cc(0.0, -8.0, 8.0), 64);
    }

    #[test]
    fn test_slider_quarter_point() {
        // 31.75 -> 32
        assert_eq!(convert::slider_to_cc(-4.0, -8.0, 8.0), 32);
    }

    #[test]
    fn test_slider_out_of_domain_saturates() {
        assert_eq!(convert::slider_to_cc(-100.0, -8.0, 8.0), 0);
        assert_eq!(convert::slider_to_cc(100.0, -8.0, 8.0), 127);
        assert_eq!(convert::slider_to_cc(f64::NAN, -8.0, 8.0), 0);
        assert_eq!(convert::slider_to_cc(f64::INFINITY, -8.0, 8.0), 127);
    }

    #[test]
    fn test_percent_conversion() {
        assert_eq!(convert::to_percent_7bit(0) as u32, 0);
        assert_eq!(convert::to_percent_7bit(127) as u32, 100);
    }

    proptest! {
        #[test]
        fn slider_value_stays_in_7bit_range(raw in -8.0f64..=8.0) {
            let cc = convert::slider_to_cc(raw, -8.0, 8.0);
            prop_assert!(cc <= 127);
        }

        #[test]
        fn slider_mapping_is_monotonic(a in -8.0f64..=8.0, b in -8.0f64..=8.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                convert::slider_to_cc(lo, -8.0, 8.0) <= convert::slider_to_cc(hi, -8.0, 8.0)
            );
        }
    }
}
