//! Directory scanning and outcome collection.

use std::path::Path;

use crate::batch::{collect_outcomes, is_image_file, scan_input_dir};
use crate::pipeline::ImageOutcome;

#[test]
fn image_extension_filter_is_case_insensitive() {
    assert!(is_image_file(Path::new("a.png")));
    assert!(is_image_file(Path::new("b.PNG")));
    assert!(is_image_file(Path::new("c.Jpeg")));
    assert!(is_image_file(Path::new("d.JPG")));
    assert!(!is_image_file(Path::new("e.gif")));
    assert!(!is_image_file(Path::new("f.txt")));
    assert!(!is_image_file(Path::new("noext")));
}

#[test]
fn scan_picks_up_only_images() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.png"), b"").unwrap();
    std::fs::write(dir.path().join("b.JPeG"), b"").unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"").unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();

    let files = scan_input_dir(dir.path()).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.png", "b.JPeG"]);
}

#[tokio::test]
async fn collector_tallies_outcomes() {
    let (tx, rx) = kanal::bounded_async::<ImageOutcome>(16);
    let collector = tokio::spawn(collect_outcomes(rx, 3));

    for i in 0..2 {
        tx.send(ImageOutcome {
            input: format!("img{i}.png").into(),
            result: Ok(()),
        })
        .await
        .unwrap();
    }
    tx.send(ImageOutcome {
        input: "bad.png".into(),
        result: Err(anyhow::anyhow!("decode failed")),
    })
    .await
    .unwrap();
    drop(tx);

    assert_eq!(collector.await.unwrap(), (2, 1));
}
