mod case_tests;
mod roster_tests;
