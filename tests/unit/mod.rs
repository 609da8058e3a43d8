mod scenario_tests;
mod validation_tests;
mod wire_tests;
