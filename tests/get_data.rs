use std::{fs::File, io::Write, path::Path};

use motion_prep::{
    config::Settings,
    data::{
        archive::write_raw_store,
        dataset::{load_raw_store, read_training_examples},
        get_data,
        record::RawMotionRecord,
    },
};
use tempfile::tempdir;
use zip::{write::FileOptions, ZipWriter};

fn body(word: &str) -> String {
    format!("{word} är viktigt för landet. ").repeat(8)
}

fn motion_json(id: &str, title: &str, text: &str) -> String {
    format!(
        r#"{{"dokumentstatus": {{"dokument": {{"titel": "{title}", "dok_id": "{id}", "datum": "2023-01-01", "systemdatum": "2023-01-02 10:00:00", "subtitel": "av Namn (A)", "html": "<p>{text}</p>"}}, "dokintressent": {{"intressent": {{"partibet": "A", "namn": "Namn"}}}}}}}}"#
    )
}

fn write_zip(path: &Path, entries: &[(&str, String)]) {
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    for (name, content) in entries {
        zip.start_file(*name, FileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

fn settings_with_archive(dir: &Path) -> Settings {
    let settings = Settings::with_data_dir(dir);
    std::fs::create_dir_all(settings.zip_dir()).unwrap();
    write_zip(
        &settings.zip_dir().join("mot-2022-2025.json.zip"),
        &[(
            "h901a1.json",
            motion_json("H901A1", "Bättre vägar", &body("Vägen")),
        )],
    );
    settings
}

#[tokio::test]
async fn missing_raw_store_is_rebuilt_from_archives() {
    let dir = tempdir().unwrap();
    let settings = settings_with_archive(dir.path());
    assert!(!settings.raw_store_path().exists());

    let summary = get_data(&settings, true).await.unwrap();
    assert_eq!(summary.downloaded, 0);
    assert!(summary.reparsed);
    assert_eq!(summary.rows, 1);

    let stored = load_raw_store(&settings.raw_store_path()).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, "H901A1");

    let examples = read_training_examples(&settings.training_table_path()).unwrap();
    assert_eq!(examples[0].title, "Bättre vägar");
}

#[tokio::test]
async fn existing_raw_store_is_used_as_is() {
    let dir = tempdir().unwrap();
    let settings = settings_with_archive(dir.path());
    let stale = RawMotionRecord {
        id: "GX02Sf1".into(),
        date: Some("2009-09-25".into()),
        file_date: Some("2009-09-25 13:21:05".into()),
        title: "Gammal motion".into(),
        subtitle: Some("av Någon (B)".into()),
        text: body("Skolan"),
        main_author: Some("Någon".into()),
        author_party: Some("B".into()),
    };
    write_raw_store(&[stale], &settings.raw_store_path()).unwrap();

    let summary = get_data(&settings, true).await.unwrap();
    assert!(!summary.reparsed);
    assert_eq!(summary.rows, 1);

    let stored = load_raw_store(&settings.raw_store_path()).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, "GX02Sf1");

    let examples = read_training_examples(&settings.training_table_path()).unwrap();
    assert_eq!(examples[0].title, "Gammal motion");
    assert!(examples[0].text.starts_with("Skolan är viktigt"));
}
