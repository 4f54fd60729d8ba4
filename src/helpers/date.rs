//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-time layouts accepted in frontmatter, tried in order
const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Date-only layouts accepted in frontmatter
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a frontmatter date string
///
/// Offsets in RFC 3339 input are dropped: the wall-clock time the author
/// wrote is what gets displayed.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_local())
}

/// Format a date using a Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "MMM D")      // -> "Jan 1"
/// format_date(&date, "YYYY-MM-DD") // -> "2022-01-01"
/// ```
pub fn format_date(date: &NaiveDateTime, format: &str) -> String {
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Format a date for the `datetime` attribute of a `<time>` element
pub fn date_xml(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Convert a Moment.js format to a chrono format
///
/// Runs of the same pattern letter form one token, so `MMM` and `M` never
/// collide the way sequential string replacement would. Text inside
/// `[...]` is copied literally.
fn moment_to_chrono_format(format: &str) -> String {
    let chars: Vec<char> = format.chars().collect();
    let mut result = String::with_capacity(format.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '[' {
            let mut j = i + 1;
            while j < chars.len() && chars[j] != ']' {
                push_literal(&mut result, chars[j]);
                j += 1;
            }
            i = j + 1;
            continue;
        }

        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }

        match token_to_chrono(c, run) {
            Some(spec) => result.push_str(spec),
            None => {
                for _ in 0..run {
                    push_literal(&mut result, c);
                }
            }
        }
        i += run;
    }

    result
}

fn token_to_chrono(letter: char, run: usize) -> Option<&'static str> {
    let spec = match (letter, run) {
        ('Y', 2) => "%y",
        ('Y', _) => "%Y",
        ('M', 1) => "%-m",
        ('M', 2) => "%m",
        ('M', 3) => "%b",
        ('M', 4) => "%B",
        ('D', 1) => "%-d",
        ('D', 2) => "%d",
        ('D', 3) => "%-j",
        ('D', 4) => "%j",
        ('d', 1) => "%w",
        ('d', 3) => "%a",
        ('d', 4) => "%A",
        ('H', 1) => "%-H",
        ('H', 2) => "%H",
        ('h', 1) => "%-I",
        ('h', 2) => "%I",
        ('m', 1) => "%-M",
        ('m', 2) => "%M",
        ('s', 1) => "%-S",
        ('s', 2) => "%S",
        ('S', 3) => "%3f",
        ('A', 1) => "%p",
        ('a', 1) => "%P",
        ('Z', 1) => "%:z",
        ('Z', 2) => "%z",
        _ => return None,
    };
    Some(spec)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}
