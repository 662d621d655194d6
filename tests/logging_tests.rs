use epex_monitor::logging::{level_rank, min_level, parse_log_level};
use tracing::Level;

#[test]
fn parses_python_style_level_names() {
    assert_eq!(parse_log_level("WARNING").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
    assert!(parse_log_level("LOUD").is_err());
}

#[test]
fn min_level_picks_the_more_verbose() {
    assert_eq!(min_level(Level::INFO, Level::DEBUG), Level::DEBUG);
    assert!(level_rank(Level::TRACE) < level_rank(Level::ERROR));
}
