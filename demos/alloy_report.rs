use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    alloy_notes::example_apps::run_alloy_report(std::env::args().skip(1))
}
