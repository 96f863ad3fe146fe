use std::fs;
use std::io::{self, Cursor, Read};
use tempfile::TempDir;
use woformat::copy::{CopyEngine, CopyMode};
use woformat::error::Error;
use woformat::filter::{FilterSet, FilterSetCollection};
use woformat::line_ending::LineEnding;

fn project_filters() -> FilterSetCollection {
    let set: FilterSet = [("@@PROJECT@@", "Foo")].into_iter().collect();
    FilterSetCollection::from(set)
}

fn lf_engine() -> CopyEngine {
    CopyEngine::new().with_line_ending(LineEnding::Lf)
}

/// Yields its content, then fails.
struct FailingReader {
    content: Cursor<Vec<u8>>,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.content.read(buf)? {
            0 => Err(io::Error::other("disk on fire")),
            n => Ok(n),
        }
    }
}

#[test_log::test]
fn test_filtered_copy_replaces_tokens() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("Info.plist");

    let mode = lf_engine()
        .copy_file(
            Cursor::new("Name: @@PROJECT@@\nOther: @@UNKNOWN@@\n"),
            &dest,
            Some(&project_filters()),
        )
        .unwrap();

    assert_eq!(mode, CopyMode::Filtered);
    assert_eq!(
        fs::read_to_string(&dest).unwrap(),
        "Name: Foo\nOther: @@UNKNOWN@@\n"
    );
}

#[test]
fn test_filtered_copy_keeps_blank_lines() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("script.sh");

    lf_engine()
        .copy_file(
            Cursor::new("a @@PROJECT@@\n\n\nb\n"),
            &dest,
            Some(&project_filters()),
        )
        .unwrap();

    assert_eq!(fs::read_to_string(&dest).unwrap(), "a Foo\n\n\nb\n");
}

#[test]
fn test_filtered_copy_uses_configured_line_ending() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("web.xml");

    CopyEngine::new()
        .with_line_ending(LineEnding::CrLf)
        .copy_file(
            Cursor::new("<name>@@PROJECT@@</name>\n\nend"),
            &dest,
            Some(&project_filters()),
        )
        .unwrap();

    // The last line gains a terminator even when the template lacks one.
    assert_eq!(
        fs::read_to_string(&dest).unwrap(),
        "<name>Foo</name>\r\n\r\nend\r\n"
    );
}

#[test]
fn test_raw_copy_is_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("logo.bin");
    let content: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();

    let mode = CopyEngine::new()
        .copy_file(Cursor::new(content.clone()), &dest, None)
        .unwrap();
    assert_eq!(mode, CopyMode::Raw);
    assert_eq!(fs::read(&dest).unwrap(), content);

    // Running again yields the same bytes.
    CopyEngine::new()
        .copy_file(Cursor::new(content.clone()), &dest, None)
        .unwrap();
    assert_eq!(fs::read(&dest).unwrap(), content);
}

#[test]
fn test_empty_filter_set_copies_raw() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("plain.txt");
    let empty: FilterSetCollection = [FilterSet::new()].into_iter().collect();

    let mode = lf_engine()
        .copy_file(Cursor::new("@@PROJECT@@\r\nno trailing newline"), &dest, Some(&empty))
        .unwrap();

    assert_eq!(mode, CopyMode::Raw);
    assert_eq!(
        fs::read_to_string(&dest).unwrap(),
        "@@PROJECT@@\r\nno trailing newline"
    );
}

#[test]
fn test_small_buffer_raw_copy() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("chunked.txt");

    CopyEngine::new()
        .with_buffer_size(3)
        .copy_file(Cursor::new("0123456789"), &dest, None)
        .unwrap();

    assert_eq!(fs::read_to_string(&dest).unwrap(), "0123456789");
}

#[test]
fn test_overwrite_removes_stale_content() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("Info.plist");
    fs::write(&dest, "a much longer previous version of the file\n".repeat(10)).unwrap();

    lf_engine()
        .copy_file(Cursor::new("short\n"), &dest, Some(&project_filters()))
        .unwrap();
    assert_eq!(fs::read_to_string(&dest).unwrap(), "short\n");

    CopyEngine::new()
        .copy_file(Cursor::new("raw"), &dest, None)
        .unwrap();
    assert_eq!(fs::read_to_string(&dest).unwrap(), "raw");
}

#[test]
fn test_missing_parent_directories_are_created() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir
        .path()
        .join("Foo.woa/Contents/Resources/Java/Info.plist");

    CopyEngine::new()
        .copy_file(Cursor::new("x"), &dest, None)
        .unwrap();

    assert!(dest.is_file());
    assert_eq!(fs::read_to_string(&dest).unwrap(), "x");
}

#[test]
fn test_read_failure_propagates_and_leaves_partial_file() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("partial.txt");
    let reader = FailingReader {
        content: Cursor::new(b"first chunk".to_vec()),
    };

    let result = CopyEngine::new().copy_file(reader, &dest, None);

    assert!(matches!(result, Err(Error::IoError(_))));
    assert_eq!(fs::read_to_string(&dest).unwrap(), "first chunk");
}

#[test]
fn test_filtered_read_failure_keeps_written_lines() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("partial.plist");
    let reader = FailingReader {
        content: Cursor::new(b"Name: @@PROJECT@@\n\nmore\n".to_vec()),
    };

    let result = lf_engine().copy_file(reader, &dest, Some(&project_filters()));

    assert!(matches!(result, Err(Error::IoError(_))));
    assert_eq!(fs::read_to_string(&dest).unwrap(), "Name: Foo\n\nmore\n");
}

#[test]
fn test_filtered_copy_splits_on_carriage_returns() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("classic.txt");

    lf_engine()
        .copy_file(
            Cursor::new("a\r\rb @@PROJECT@@\r"),
            &dest,
            Some(&project_filters()),
        )
        .unwrap();
    assert_eq!(fs::read_to_string(&dest).unwrap(), "a\n\nb Foo\n");

    lf_engine()
        .copy_file(
            Cursor::new("x\r\ny\r\r\n@@PROJECT@@"),
            &dest,
            Some(&project_filters()),
        )
        .unwrap();
    assert_eq!(fs::read_to_string(&dest).unwrap(), "x\ny\n\nFoo\n");
}

#[test]
fn test_latin1_template_is_filtered() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("Info.plist");

    lf_engine()
        .copy_file(
            Cursor::new(b"Caf\xe9 @@PROJECT@@\n\xff\xfe\n".to_vec()),
            &dest,
            Some(&project_filters()),
        )
        .unwrap();

    assert_eq!(fs::read(&dest).unwrap(), b"Caf\xe9 Foo\n\xff\xfe\n".to_vec());
}
