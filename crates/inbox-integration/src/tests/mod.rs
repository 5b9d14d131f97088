mod normalize_tests;
mod support;
