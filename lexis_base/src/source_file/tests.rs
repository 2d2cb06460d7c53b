use super::Location;

#[test]
fn test_get_line_byte_positions() {
    let text = "Hello\nworld\r\n!\rtes";
    let byte_positions = super::get_line_byte_positions(text);
    assert_eq!(byte_positions, vec![0..6, 6..13, 13..18]);
}

#[test]
fn test_mapped_file() {
    const TEST_FILE: &str = "var x = 5;\nvar y = 10;";
    let source_file = super::SourceFile::temp(TEST_FILE).unwrap();
    assert_eq!(source_file.content(), TEST_FILE);
    assert_eq!(source_file.line_count(), 2);
    assert_eq!(source_file.get_line(1), Some("var x = 5;\n"));
    assert_eq!(source_file.get_line(2), Some("var y = 10;"));
    assert_eq!(source_file.get_line(0), None);
    assert_eq!(source_file.get_line(3), None);
}

#[test]
fn test_empty_file() {
    let source_file = super::SourceFile::temp("").unwrap();
    assert_eq!(source_file.content(), "");
    assert_eq!(source_file.line_count(), 1);
}

#[test]
fn test_location_advance() {
    let location = "ab\n\tc"
        .chars()
        .fold(Location::START, Location::advance);

    assert_eq!(location, Location::new(2, 3));
    assert_eq!(location.to_string(), "2:3");
}
