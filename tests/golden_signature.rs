use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use sha2::{Digest, Sha256};
use signsheet::platform::StaticDevice;
use signsheet::rendering::layout::Rect;
use signsheet::{InputEvent, PadConfig, SignatureImage};

/// Side of a golden cell, in physical pixels.
const CELL: u32 = 16;

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

/// A fixed stair-and-zig-zag on a 2x surface. Every vertex sits on a cell
/// centre and every segment is axis-aligned or at 45 degrees, so each cell
/// is either crossed by the stroke or stays well clear of it.
fn reference_signature() -> SignatureImage {
    let saved = Arc::new(Mutex::new(None));
    let mut pad = signsheet::new_pad(PadConfig::default());
    let s = saved.clone();
    pad.on_save(move |img| *s.lock().unwrap() = Some(img.clone()));
    pad.mount(Rect::new(0.0, 0.0, 120.0, 48.0), &StaticDevice::with_ratio(2.0));

    let points = [
        (4.0, 36.0),
        (28.0, 36.0),
        (28.0, 12.0),
        (44.0, 12.0),
        (60.0, 28.0),
        (76.0, 12.0),
        (92.0, 28.0),
        (92.0, 36.0),
        (116.0, 36.0),
    ];
    pad.pointer_down(&mut InputEvent::pointer(points[0].0, points[0].1));
    for &(x, y) in &points[1..] {
        pad.pointer_move(&mut InputEvent::pointer(x, y));
    }
    pad.pointer_up(&mut InputEvent::pointer(116.0, 36.0));

    let img = saved.lock().unwrap().take();
    img.expect("stroke end should save")
}

/// One line per row of cells: `#` where any pixel in the cell carries ink.
fn ink_map(img: &SignatureImage) -> String {
    let pixmap = img.decode().expect("decode");
    let mut map = String::new();
    for cy in 0..img.height / CELL {
        for cx in 0..img.width / CELL {
            let inked = (0..CELL).any(|dy| {
                (0..CELL).any(|dx| {
                    pixmap
                        .pixel(cx * CELL + dx, cy * CELL + dy)
                        .map_or(false, |p| p.alpha() > 0)
                })
            });
            map.push(if inked { '#' } else { '.' });
        }
        map.push('\n');
    }
    map
}

#[test]
fn golden_signature_matches_fixture() {
    let img = reference_signature();
    assert_eq!((img.width, img.height), (240, 96));
    assert_eq!(&img.png_data[0..8], b"\x89PNG\r\n\x1a\n");

    let map = ink_map(&img);
    let digest = hex::encode(Sha256::digest(map.as_bytes()));
    let expected_path = golden_path("zigzag.sha256");
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens/expected").ok();
        fs::write(&expected_path, &digest).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    let exp = fs::read_to_string(&expected_path).expect("unable to read golden");
    assert_eq!(digest, exp.trim(), "ink map differs from golden:\n{}", map);
}

#[test]
fn ink_map_follows_the_stroke() {
    let map = ink_map(&reference_signature());
    let rows: Vec<&str> = map.lines().collect();
    assert_eq!(rows.len(), 6);
    // The first and last rows of cells are never touched.
    assert!(rows[0].chars().all(|c| c == '.'));
    assert!(rows[5].chars().all(|c| c == '.'));
    // The baseline runs (4..28 and 92..116 logical) ink the outer cells of row 4.
    assert!(rows[4].starts_with("####"));
    assert!(rows[4].ends_with("####"));
}

#[test]
fn rendering_is_deterministic() {
    let a = reference_signature();
    let b = reference_signature();
    assert_eq!(Sha256::digest(&a.png_data), Sha256::digest(&b.png_data));
}
