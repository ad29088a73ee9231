mod digit_tests;
