use crate::error::ScrapeError;
use crate::records::PageInfo;

/// Separator the site uses inside question ranges ("1 - 5")
pub const RANGE_SEPARATOR: char = '-';

/// Number of counters a well-formed pagination label carries
pub const PAGE_INFO_DIGITS: usize = 5;

/// Extracts the numeric tokens from a freeform label, in encounter order
///
/// The separator character is replaced with a space before splitting so that
/// ranges written as "1-5" yield two tokens. Tokens containing anything but
/// ASCII digits are dropped.
pub fn parse_digits(label: &str, separator: char) -> Vec<u32> {
    label
        .replace(separator, " ")
        .split_whitespace()
        .filter(|token| !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()))
        .filter_map(|token| token.parse().ok())
        .collect()
}

/// Parses the page-position label into pagination counters
///
/// The first five numeric tokens, in encounter order, are the current page,
/// the total page count, the first and last question numbers visible on the
/// page, and the exam's total question count. Fewer than five tokens, or
/// counters that contradict each other, mean the page markup changed or
/// never finished loading.
pub fn parse_page_info(label: &str) -> Result<PageInfo, ScrapeError> {
    let digits = parse_digits(label, RANGE_SEPARATOR);

    if digits.len() < PAGE_INFO_DIGITS {
        return Err(malformed(format!(
            "expected at least {} numeric tokens, found {}",
            PAGE_INFO_DIGITS,
            digits.len()
        )));
    }

    let info = PageInfo {
        current_page: digits[0],
        total_pages: digits[1],
        range_start: digits[2],
        range_end: digits[3],
        total_items: digits[4],
    };

    // The counters must describe a real position, otherwise items_in_page
    // and loop termination are meaningless
    if info.current_page == 0 {
        return Err(malformed(format!("current page is 0 in {:?}", label)));
    }
    if info.total_pages < info.current_page {
        return Err(malformed(format!(
            "page {} of only {} total pages",
            info.current_page, info.total_pages
        )));
    }
    if info.range_end < info.range_start {
        return Err(malformed(format!(
            "inverted question range {} - {}",
            info.range_start, info.range_end
        )));
    }

    Ok(info)
}

fn malformed(reason: String) -> ScrapeError {
    ScrapeError::MalformedPageInfo { reason }
}
