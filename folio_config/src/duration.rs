use std::ops::Deref;

use serde::Deserialize;

/// A duration given as whitespace separated parts like `"1m 30s"` or `"500ms"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::str::FromStr for Duration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(parse_part)
            .sum::<Result<std::time::Duration, _>>()
            .map(Self)
    }
}

fn parse_part(part: &str) -> Result<std::time::Duration, String> {
    let split = part
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| format!("Missing unit in duration part {part:?}"))?;
    let (value, unit) = part.split_at(split);
    let value = value
        .parse::<u64>()
        .map_err(|_| format!("Invalid number in duration part {part:?}"))?;

    let millis = match unit {
        "ms" => 1,
        "s" => 1000,
        "m" => 60 * 1000,
        "h" => 60 * 60 * 1000,
        "d" => 24 * 60 * 60 * 1000,
        _ => return Err(format!("Invalid unit in duration part {part:?}")),
    };

    value
        .checked_mul(millis)
        .map(std::time::Duration::from_millis)
        .ok_or_else(|| format!("Duration part {part:?} is too large"))
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration() {
        for (input, expected) in [
            ("250ms", Some(250)),
            ("13s", Some(13_000)),
            ("42m", Some(42 * 60_000)),
            ("7h", Some(7 * 60 * 60_000)),
            ("2d", Some(2 * 24 * 60 * 60_000)),
            ("", Some(0)),
            ("1m 30s 500ms", Some(90_500)),
            ("10", None),
            ("s", None),
            ("xyz", None),
            ("7dd", None),
            ("-1s", None),
        ] {
            let input = serde_json::Value::String(input.into());
            let output = serde_json::from_value::<Duration>(input)
                .ok()
                .map(|x| x.0.as_millis());
            assert_eq!(output, expected);
        }
    }
}
