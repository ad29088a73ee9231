use crate::error::ScrapeError;
use crate::parsers::digits;

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_parse_digits_encounter_order() {
        // Mixed words and numbers
        let result = digits::parse_digits("Page 1 of 10", '-');
        assert_eq!(result, vec![1, 10]);

        // Separator splits ranges into two tokens
        let result = digits::parse_digits("Questions 1-5 of 50", '-');
        assert_eq!(result, vec![1, 5, 50]);

        // Tokens with non-digit characters are dropped
        let result = digits::parse_digits("Page 1/10", '-');
        assert!(result.is_empty());

        // Empty label
        let result = digits::parse_digits("", '-');
        assert!(result.is_empty());

        // Alternate separator
        let result = digits::parse_digits("Page 1/10", '/');
        assert_eq!(result, vec![1, 10]);
    }

    #[test]
    fn test_parse_page_info_well_formed() {
        let label = "Viewing page 1 of 10 - questions 1 - 5 out of 50";
        let info = digits::parse_page_info(label).unwrap();

        assert_eq!(info.current_page, 1);
        assert_eq!(info.total_pages, 10);
        assert_eq!(info.range_start, 1);
        assert_eq!(info.range_end, 5);
        assert_eq!(info.total_items, 50);
        assert_eq!(info.items_in_page(), 5);
        assert!(info.has_next());
    }

    #[test]
    fn test_parse_page_info_last_page() {
        let label = "Viewing page 10 of 10 - questions 46 - 50 out of 50";
        let info = digits::parse_page_info(label).unwrap();

        assert_eq!(info.current_page, 10);
        assert_eq!(info.items_in_page(), 5);
        assert!(!info.has_next());
    }

    fn expect_malformed(label: &str) -> String {
        match digits::parse_page_info(label) {
            Err(ScrapeError::MalformedPageInfo { reason }) => reason,
            other => panic!("expected MalformedPageInfo, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_page_info_too_few_digits() {
        // Four numeric tokens only
        let reason = expect_malformed("Viewing page 1 of 10 - questions 1 - 5");
        assert!(reason.contains("found 4"), "unexpected reason: {}", reason);

        // No numeric tokens at all (page failed to load)
        let reason = expect_malformed("Loading...");
        assert!(reason.contains("found 0"), "unexpected reason: {}", reason);
    }

    #[test]
    fn test_parse_page_info_rejects_contradictory_counters() {
        // Inverted question range would make items_in_page meaningless
        let reason = expect_malformed("Viewing page 1 of 10 - questions 9 - 5 out of 50");
        assert!(reason.contains("inverted"), "unexpected reason: {}", reason);

        // Current page past the total page count
        let reason = expect_malformed("Viewing page 3 of 2 - questions 1 - 5 out of 50");
        assert!(reason.contains("total pages"), "unexpected reason: {}", reason);

        // Pages are 1-based
        let reason = expect_malformed("Viewing page 0 of 10 - questions 1 - 5 out of 50");
        assert!(reason.contains("page is 0"), "unexpected reason: {}", reason);
    }
}
