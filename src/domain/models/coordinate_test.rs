use super::parse_number;
use super::Coordinate;

#[test]
fn it_parses_numbers() {
    assert_eq!(parse_number(" 28.6139 "), Some(28.6139));
    assert_eq!(parse_number("-77"), Some(-77.0));
}

#[test]
fn it_rejects_invalid_numbers() {
    assert_eq!(parse_number("abc"), None);
    assert_eq!(parse_number(""), None);
    assert_eq!(parse_number("NaN"), None);
    assert_eq!(parse_number("inf"), None);
}

#[test]
fn it_parses_coordinates() {
    let coordinate = Coordinate::parse("28.6139", "77.209").unwrap();
    assert_eq!(coordinate, Coordinate::new(28.6139, 77.209));
    assert_eq!(coordinate.to_string(), "28.6139, 77.209");
}

#[test]
fn it_fails_coordinates_when_either_value_is_invalid() {
    assert!(Coordinate::parse("abc", "77.209").is_none());
    assert!(Coordinate::parse("28.6139", "").is_none());
}
