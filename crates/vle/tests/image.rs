//! Decoding and tallying real image files.

use std::io::Write;

use tempfile::NamedTempFile;
use vle::{Error, Image, Tally, lift_all, scan};
use vle_isa::{Category, Session};

/// Function prologue and epilogue followed by an EFPU add.
const CODE: [u8; 16] = [
    0x18, 0x21, 0x06, 0xF0, // e_stwu r1, -16(r1)
    0x00, 0x80, // se_mflr r0
    0x54, 0x01, 0x00, 0x14, // e_stw r0, 20(r1)
    0x10, 0x64, 0x2A, 0xC0, // efsadd r3, r4, r5
    0x00, 0x04, // se_blr
];

fn image_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(&CODE).expect("failed to write image");
    file
}

#[test]
fn test_scan_file_window() {
    let file = image_file();
    let session = Session::new(Category::SP).unwrap();
    let image = Image::open(file.path(), 0x0080_0000).unwrap();
    assert_eq!(image.len(), CODE.len());

    let decoded = scan(&session, image.window(4, None).unwrap(), image.base() + 4);
    let listing: Vec<_> = decoded
        .iter()
        .map(|d| (d.address, d.inst.map(|i| i.to_string())))
        .collect();
    assert_eq!(
        listing,
        [
            (0x0080_0004, Some("se_mflr r0".to_string())),
            (0x0080_0006, Some("e_stw r0, 20(r1)".to_string())),
            (0x0080_000A, Some("efsadd r3, r4, r5".to_string())),
            (0x0080_000E, Some("se_blr".to_string())),
        ]
    );
}

#[test]
fn test_category_gates_extension() {
    let file = image_file();
    let image = Image::open(file.path(), 0).unwrap();
    let bytes = image.window(0, None).unwrap();

    let with_sp = Session::new(Category::SP).unwrap();
    let tally = Tally::collect(&with_sp, &scan(&with_sp, bytes, 0));
    assert_eq!(tally.decoded, 5);
    assert_eq!(tally.unknown, 0);
    assert_eq!(tally.translated, 5);

    let without = Session::new(Category::empty()).unwrap();
    let tally = Tally::collect(&without, &scan(&without, bytes, 0));
    assert_eq!(tally.unknown, 1);
    assert!(!tally.by_mnemonic.contains_key("efsadd"));
}

#[test]
fn test_lift_file() {
    let file = image_file();
    let session = Session::new(Category::SP).unwrap();
    let image = Image::open(file.path(), 0).unwrap();
    let lifted = lift_all(&session, &scan(&session, image.window(0, None).unwrap(), 0));
    assert_eq!(lifted.len(), 5);
    let (last, ir) = lifted.last().unwrap();
    assert_eq!(last.mnemonic(), "se_blr");
    assert!(ir.is_block_end());
}

#[test]
fn test_missing_file_and_bad_range() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Image::open(dir.path().join("absent.bin"), 0),
        Err(Error::Io(_))
    ));
    let file = image_file();
    let image = Image::open(file.path(), 0).unwrap();
    assert!(matches!(
        image.window(8, Some(0x100)),
        Err(Error::Range { .. })
    ));
}
