//! Color pick panel state.
//!
//! Editing a channel is an explicit state rather than a nested input loop, so
//! the main loop keeps rendering and polling while digits are typed.

use std::fmt::Write as _;

use crate::color::Color;
use crate::view::Rect;

/// Longest buffer kept while typing; longer input is folded in place.
const MAX_BUFFER_DIGITS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn label_char(self) -> char {
        match self {
            Channel::Red => 'R',
            Channel::Green => 'G',
            Channel::Blue => 'B',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PickerState {
    #[default]
    Idle,
    EditingChannel {
        channel: Channel,
        buffer: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPicker {
    color: Color,
    state: PickerState,
}

impl Default for ColorPicker {
    fn default() -> Self {
        Self::new(Color::BLACKISH)
    }
}

impl ColorPicker {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            state: PickerState::Idle,
        }
    }

    /// The committed paint color. Digits still being typed do not count.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, PickerState::EditingChannel { .. })
    }

    pub fn editing_channel(&self) -> Option<Channel> {
        match self.state {
            PickerState::EditingChannel { channel, .. } => Some(channel),
            PickerState::Idle => None,
        }
    }

    /// Start editing `channel`, seeding the buffer with its current value.
    /// An edit already in progress is discarded.
    pub fn begin_edit(&mut self, channel: Channel) {
        self.state = PickerState::EditingChannel {
            channel,
            buffer: self.color.channel(channel).to_string(),
        };
    }

    /// Append a decimal digit. Ignored when idle or when `digit > 9`.
    ///
    /// Past three digits the buffer is replaced by its value mod 256, which
    /// keeps the label short and leaves the committed value unchanged.
    pub fn push_digit(&mut self, digit: u8) {
        if digit > 9 {
            return;
        }
        if let PickerState::EditingChannel { buffer, .. } = &mut self.state {
            buffer.push(char::from(b'0' + digit));
            if buffer.len() > MAX_BUFFER_DIGITS {
                if let Some(value) = fold_digits(buffer) {
                    *buffer = value.to_string();
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        if let PickerState::EditingChannel { buffer, .. } = &mut self.state {
            buffer.pop();
        }
    }

    /// Store the typed value into the channel, folded mod 256, and go idle.
    ///
    /// Returns the channel that changed, if any. An empty buffer leaves the
    /// channel as it was.
    pub fn commit(&mut self) -> Option<Channel> {
        let PickerState::EditingChannel { channel, buffer } = std::mem::take(&mut self.state)
        else {
            return None;
        };
        let value = fold_digits(&buffer)?;
        self.color.set_channel(channel, value);
        Some(channel)
    }

    pub fn cancel(&mut self) {
        self.state = PickerState::Idle;
    }

    /// Panel text for a channel: `R: 128`, or `R: 12_` while it is edited.
    pub fn label(&self, channel: Channel) -> String {
        let mut text = format!("{}: ", channel.label_char());
        match &self.state {
            PickerState::EditingChannel {
                channel: editing,
                buffer,
            } if *editing == channel => {
                text.push_str(buffer);
                text.push('_');
            }
            _ => {
                let _ = write!(text, "{}", self.color.channel(channel));
            }
        }
        text
    }
}

/// Reduce a decimal digit string mod 256 without overflowing, however long
/// it is. `None` for an empty string.
fn fold_digits(digits: &str) -> Option<u8> {
    if digits.is_empty() {
        return None;
    }
    let value = digits
        .bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u32, |acc, d| (acc * 10 + u32::from(d - b'0')) % 256);
    Some(value as u8)
}

/// Hit rectangles of the color panel, in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerLayout {
    pub swatch: Rect,
    pub red: Rect,
    pub green: Rect,
    pub blue: Rect,
}

impl Default for PickerLayout {
    fn default() -> Self {
        Self {
            swatch: Rect::new(1075, 200, 50, 50),
            red: Rect::new(1050, 250, 150, 50),
            green: Rect::new(1050, 300, 150, 50),
            blue: Rect::new(1050, 350, 150, 50),
        }
    }
}

impl PickerLayout {
    pub fn label_rect(&self, channel: Channel) -> Rect {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    /// Channel whose label is under the point.
    pub fn channel_at(&self, x: i32, y: i32) -> Option<Channel> {
        Channel::ALL
            .into_iter()
            .find(|&channel| self.label_rect(channel).contains(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_digits(picker: &mut ColorPicker, digits: &str) {
        for d in digits.bytes() {
            picker.push_digit(d - b'0');
        }
    }

    #[test]
    fn test_default_pick_is_blackish() {
        let picker = ColorPicker::default();
        assert_eq!(picker.color(), Color::rgb(50, 50, 50));
        assert!(!picker.is_editing());
    }

    #[test]
    fn test_begin_edit_seeds_buffer() {
        let mut picker = ColorPicker::default();
        picker.begin_edit(Channel::Green);
        assert_eq!(
            picker.state(),
            &PickerState::EditingChannel {
                channel: Channel::Green,
                buffer: "50".to_string()
            }
        );
        assert_eq!(picker.label(Channel::Green), "G: 50_");
        assert_eq!(picker.label(Channel::Red), "R: 50");
    }

    #[test]
    fn test_commit_folds_mod_256() {
        let mut picker = ColorPicker::default();
        picker.begin_edit(Channel::Red);
        picker.backspace();
        picker.backspace();
        type_digits(&mut picker, "300");
        assert_eq!(picker.commit(), Some(Channel::Red));
        assert_eq!(picker.color(), Color::rgb(44, 50, 50));
        assert!(!picker.is_editing());
    }

    #[test]
    fn test_commit_long_input_is_exact() {
        let mut picker = ColorPicker::default();
        picker.begin_edit(Channel::Blue);
        picker.backspace();
        picker.backspace();
        // 10^20 mod 256 == 0, 10^20 + 7 mod 256 == 7
        type_digits(&mut picker, "100000000000000000007");
        picker.commit();
        assert_eq!(picker.color().b, 7);
    }

    #[test]
    fn test_buffer_stays_short() {
        let mut picker = ColorPicker::default();
        picker.begin_edit(Channel::Green);
        type_digits(&mut picker, "12");
        // "5012" mod 256
        assert_eq!(picker.label(Channel::Green), "G: 148_");

        type_digits(&mut picker, "99999999999999999999");
        let PickerState::EditingChannel { buffer, .. } = picker.state() else {
            panic!("expected an edit in progress");
        };
        assert!(buffer.len() <= MAX_BUFFER_DIGITS, "buffer {:?}", buffer);
    }

    #[test]
    fn test_appending_to_seeded_value() {
        let mut picker = ColorPicker::default();
        picker.begin_edit(Channel::Red);
        type_digits(&mut picker, "1");
        picker.commit();
        // "501" mod 256
        assert_eq!(picker.color().r, 245);
    }

    #[test]
    fn test_empty_commit_keeps_channel() {
        let mut picker = ColorPicker::default();
        picker.begin_edit(Channel::Red);
        picker.backspace();
        picker.backspace();
        picker.backspace();
        assert_eq!(picker.commit(), None);
        assert_eq!(picker.color(), Color::BLACKISH);
        assert!(!picker.is_editing());
    }

    #[test]
    fn test_cancel_discards_edit() {
        let mut picker = ColorPicker::default();
        picker.begin_edit(Channel::Red);
        type_digits(&mut picker, "99");
        picker.cancel();
        assert_eq!(picker.color(), Color::BLACKISH);
        assert_eq!(picker.label(Channel::Red), "R: 50");
    }

    #[test]
    fn test_input_ignored_when_idle() {
        let mut picker = ColorPicker::default();
        picker.push_digit(5);
        picker.backspace();
        assert_eq!(picker.commit(), None);
        assert_eq!(picker, ColorPicker::default());
    }

    #[test]
    fn test_push_digit_rejects_non_digit() {
        let mut picker = ColorPicker::default();
        picker.begin_edit(Channel::Red);
        picker.push_digit(10);
        assert_eq!(picker.label(Channel::Red), "R: 50_");
    }

    #[test]
    fn test_layout_hit_testing() {
        let layout = PickerLayout::default();
        assert_eq!(layout.channel_at(1060, 260), Some(Channel::Red));
        assert_eq!(layout.channel_at(1199, 310), Some(Channel::Green));
        assert_eq!(layout.channel_at(1050, 399), Some(Channel::Blue));
        assert_eq!(layout.channel_at(1060, 400), None);
        assert_eq!(layout.channel_at(1090, 220), None);
        assert_eq!(layout.channel_at(500, 260), None);
    }
}
