use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    review_dashboard::cli::run_dashboard_report(std::env::args().skip(1))
}
