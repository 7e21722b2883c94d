use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// The committed countdown interval. Displays as `MM:SS`, with minutes
/// padded to at least two digits and unbounded above.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CountdownDuration(pub Duration);

impl CountdownDuration {
    pub fn from_secs(secs: u64) -> CountdownDuration {
        CountdownDuration(Duration::from_secs(secs))
    }

    pub fn as_secs(&self) -> u64 {
        self.0.as_secs()
    }
}

impl Default for CountdownDuration {
    fn default() -> CountdownDuration {
        CountdownDuration::from_secs(3600)
    }
}

impl Display for CountdownDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let minutes = self.0.as_secs() / 60;
        let seconds = self.0.as_secs() % 60;
        write!(f, "{minutes:02}:{seconds:02}")
    }
}

#[derive(Debug, Error)]
pub enum ParseCountdownError {
    #[error("expected \"minutes\" or \"minutes:seconds\"")]
    InvalidFormat,
    #[error("seconds must be less than 60")]
    TooManySeconds,
    #[error("seconds must be two digits")]
    NotTwoDigitsForSeconds,
    #[error("interval must be greater than zero")]
    Zero,
    #[error("failed to parse integer: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}

impl FromStr for CountdownDuration {
    type Err = ParseCountdownError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v: Vec<&str> = s.split(':').collect();
        let minutes = v[0].parse::<u64>()?;

        let total = match v.len() {
            1 => minutes * 60,
            2 => {
                let seconds = v[1].parse::<u64>()?;
                if seconds > 59 {
                    return Err(ParseCountdownError::TooManySeconds);
                } else if v[1].len() != 2 {
                    return Err(ParseCountdownError::NotTwoDigitsForSeconds);
                }

                minutes * 60 + seconds
            }
            _ => return Err(ParseCountdownError::InvalidFormat),
        };

        if total == 0 {
            return Err(ParseCountdownError::Zero);
        }

        Ok(CountdownDuration::from_secs(total))
    }
}

/// Signalled when an edited interval sums to zero seconds. The previously
/// committed interval stays in effect.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("interval must be greater than zero")]
pub struct InvalidInterval;

/// Which of the three draft fields currently has input focus.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DraftField {
    Hours,
    Minutes,
    Seconds,
}

impl DraftField {
    pub fn next(self) -> DraftField {
        match self {
            DraftField::Hours => DraftField::Minutes,
            DraftField::Minutes => DraftField::Seconds,
            DraftField::Seconds => DraftField::Hours,
        }
    }

    pub fn prev(self) -> DraftField {
        match self {
            DraftField::Hours => DraftField::Seconds,
            DraftField::Minutes => DraftField::Hours,
            DraftField::Seconds => DraftField::Minutes,
        }
    }
}

/// In-progress hours/minutes/seconds edits, distinct from the committed
/// interval until applied. Fields hold raw digit buffers; anything that
/// fails to parse counts as zero.
#[derive(Debug, Clone)]
pub struct IntervalDraft {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl IntervalDraft {
    /// Decomposes a committed interval back into editable fields.
    pub fn from_duration(duration: CountdownDuration) -> IntervalDraft {
        let total = duration.as_secs();
        IntervalDraft {
            hours: (total / 3600).to_string(),
            minutes: (total % 3600 / 60).to_string(),
            seconds: (total % 60).to_string(),
        }
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Hours => &self.hours,
            DraftField::Minutes => &self.minutes,
            DraftField::Seconds => &self.seconds,
        }
    }

    fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Hours => &mut self.hours,
            DraftField::Minutes => &mut self.minutes,
            DraftField::Seconds => &mut self.seconds,
        }
    }

    pub fn push_digit(&mut self, field: DraftField, digit: char) {
        if !digit.is_ascii_digit() {
            return;
        }
        let buffer = self.field_mut(field);
        if buffer.len() < 3 {
            buffer.push(digit);
        }
    }

    pub fn backspace(&mut self, field: DraftField) {
        self.field_mut(field).pop();
    }

    pub fn total_seconds(&self) -> u64 {
        parse_field(&self.hours) * 3600 + parse_field(&self.minutes) * 60 + parse_field(&self.seconds)
    }

    /// Commits the draft. A zero total is rejected and the caller keeps
    /// whatever interval was committed before.
    pub fn apply(&self) -> Result<CountdownDuration, InvalidInterval> {
        match self.total_seconds() {
            0 => Err(InvalidInterval),
            total => Ok(CountdownDuration::from_secs(total)),
        }
    }
}

fn parse_field(buffer: &str) -> u64 {
    buffer.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_minutes_and_seconds_padded() {
        assert_eq!(CountdownDuration::from_secs(65).to_string(), "01:05");
        assert_eq!(CountdownDuration::from_secs(3600).to_string(), "60:00");
        assert_eq!(CountdownDuration::from_secs(0).to_string(), "00:00");
        assert_eq!(CountdownDuration::from_secs(6000).to_string(), "100:00");
    }

    #[test]
    fn parses_minutes_and_minutes_seconds() {
        let parsed: CountdownDuration = "25".parse().expect("valid");
        assert_eq!(parsed.as_secs(), 25 * 60);

        let parsed: CountdownDuration = "01:30".parse().expect("valid");
        assert_eq!(parsed.as_secs(), 90);
    }

    #[test]
    fn rejects_malformed_durations() {
        assert!("1:2:3".parse::<CountdownDuration>().is_err());
        assert!("1:60".parse::<CountdownDuration>().is_err());
        assert!("1:5".parse::<CountdownDuration>().is_err());
        assert!("abc".parse::<CountdownDuration>().is_err());
        assert!("0".parse::<CountdownDuration>().is_err());
        assert!("0:00".parse::<CountdownDuration>().is_err());
    }

    #[test]
    fn draft_total_sums_fields() {
        let draft = IntervalDraft {
            hours: "1".to_string(),
            minutes: "30".to_string(),
            seconds: "15".to_string(),
        };

        assert_eq!(draft.total_seconds(), 3600 + 30 * 60 + 15);
    }

    #[test]
    fn draft_treats_unparsable_fields_as_zero() {
        let draft = IntervalDraft {
            hours: "".to_string(),
            minutes: "007".to_string(),
            seconds: "  ".to_string(),
        };

        assert_eq!(draft.total_seconds(), 7 * 60);
    }

    #[test]
    fn apply_rejects_a_zero_total() {
        let draft = IntervalDraft {
            hours: "0".to_string(),
            minutes: "".to_string(),
            seconds: "0".to_string(),
        };

        assert_eq!(draft.apply(), Err(InvalidInterval));
    }

    #[test]
    fn apply_commits_a_positive_total() {
        let draft = IntervalDraft {
            hours: "0".to_string(),
            minutes: "0".to_string(),
            seconds: "1".to_string(),
        };

        assert_eq!(draft.apply(), Ok(CountdownDuration::from_secs(1)));
    }

    #[test]
    fn decompose_round_trips_through_apply() {
        for secs in [1, 59, 60, 3600, 3661, 24 * 3600] {
            let draft = IntervalDraft::from_duration(CountdownDuration::from_secs(secs));
            assert_eq!(draft.apply(), Ok(CountdownDuration::from_secs(secs)));
        }
    }

    #[test]
    fn push_digit_ignores_non_digits_and_caps_length() {
        let mut draft = IntervalDraft::from_duration(CountdownDuration::from_secs(0));
        draft.hours.clear();

        draft.push_digit(DraftField::Hours, 'x');
        assert_eq!(draft.hours, "");

        for digit in ['1', '2', '3', '4'] {
            draft.push_digit(DraftField::Hours, digit);
        }
        assert_eq!(draft.hours, "123");
    }

    #[test]
    fn backspace_drops_the_last_digit() {
        let mut draft = IntervalDraft::from_duration(CountdownDuration::from_secs(3600));

        draft.backspace(DraftField::Hours);
        assert_eq!(draft.hours, "");

        draft.backspace(DraftField::Hours);
        assert_eq!(draft.hours, "");
    }

    #[test]
    fn field_focus_cycles_both_ways() {
        assert_eq!(DraftField::Hours.next(), DraftField::Minutes);
        assert_eq!(DraftField::Seconds.next(), DraftField::Hours);
        assert_eq!(DraftField::Hours.prev(), DraftField::Seconds);
        assert_eq!(DraftField::Minutes.prev(), DraftField::Hours);
    }
}
