use chrono::NaiveDate;
use motion_prep::{
    config::{Settings, GENERIC_TITLE_PREFIX, MIN_TEXT_CHARS},
    data::{
        archive::write_raw_store,
        dataset::{self, CleanedMotionRecord, DatasetError, MotionRow},
        record::RawMotionRecord,
    },
    text::TrimPipeline,
};
use tempfile::tempdir;

const MOTION_SF368: &str = include_str!("fixtures/motion_sf368.txt");
const MOTION_JU219: &str = include_str!("fixtures/motion_ju219.txt");

fn row(title: &str, text: &str) -> CleanedMotionRecord {
    let date = NaiveDate::from_ymd_opt(2022, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    CleanedMotionRecord {
        id: "id".into(),
        date,
        file_date: date,
        title: title.into(),
        subtitle: "av Någon (x)".into(),
        text: text.into(),
        main_author: "Någon".into(),
        author_party: "X".into(),
    }
}

fn raw(id: &str, title: &str, subtitle: Option<&str>, text: &str) -> RawMotionRecord {
    RawMotionRecord {
        id: id.into(),
        date: Some("2009-09-25".into()),
        file_date: Some("2009-09-25 13:21:05".into()),
        title: title.into(),
        subtitle: subtitle.map(Into::into),
        text: text.into(),
        main_author: Some("John Doe".into()),
        author_party: Some("M".into()),
    }
}

#[test]
fn short_text_filter_boundary() {
    let rows = vec![row("Kept", &"a".repeat(150)), row("Dropped", &"å".repeat(149))];
    let kept = dataset::filter_short_motions(rows, MIN_TEXT_CHARS);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].title, "Kept");
}

#[test]
fn generic_titles_are_dropped_case_insensitively() {
    let rows = vec![
        row("Med anledning av prop ABC", "t"),
        row("Title 2", "t"),
        row("ABC med anledning av prop", "t"),
        row("med anledning av prop XYZ", "t"),
        row("MED ANLEDNING AV PROP. 2009/10:1", "t"),
    ];
    let kept = dataset::filter_titles(rows, GENERIC_TITLE_PREFIX);
    let titles: Vec<_> = kept.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["Title 2", "ABC med anledning av prop"]);
}

#[test]
fn rows_with_missing_values_are_dropped() {
    let mut no_author = raw("2", "Title 2", Some("s"), "Text 2");
    no_author.main_author = None;
    let mut bad_date = raw("3", "Title 3", Some("s"), "Text 3");
    bad_date.date = Some("not a date".into());
    let rows: Vec<MotionRow> = vec![
        raw("1", "Title 1", Some("s"), "Text 1"),
        no_author,
        bad_date,
        raw("4", "Title 4", None, "Text 4"),
    ]
    .into_iter()
    .map(MotionRow::from)
    .collect();

    let kept = dataset::filter_nan_rows(rows);
    let ids: Vec<_> = kept.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["1"]);
    assert_eq!(
        kept[0].file_date,
        NaiveDate::from_ymd_opt(2009, 9, 25)
            .unwrap()
            .and_hms_opt(13, 21, 5)
            .unwrap()
    );
}

#[test]
fn prep_text_collapses_titles_and_trims_bodies() {
    let mut motion = row("Personalpool   för\npolisen", "");
    motion.subtitle = "av Hans Backman (fp)".into();
    motion.text = MOTION_JU219.into();
    let out = dataset::prep_text(vec![motion], &TrimPipeline::for_motions());
    assert_eq!(out[0].title, "Personalpool för polisen");
    assert!(out[0].text.starts_with("Trygghet är viktigt."));
}

#[test]
fn dates_in_known_formats_parse() {
    assert!(dataset::parse_date("2023-01-01").is_some());
    assert!(dataset::parse_date("2023-01-01 10:00:00").is_some());
    assert!(dataset::parse_date("2023-01-01T10:00:00").is_some());
    assert!(dataset::parse_date("01/01/2023").is_none());
}

#[test]
fn missing_raw_store_is_a_no_data_error() {
    let dir = tempdir().unwrap();
    let settings = Settings::with_data_dir(dir.path());
    let err = dataset::prep_training_dataset(&settings).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DatasetError>(),
        Some(DatasetError::NoData(_))
    ));
    assert!(err.to_string().starts_with("no data found at"));
}

#[test]
fn training_table_is_built_from_raw_store() {
    let dir = tempdir().unwrap();
    let settings = Settings::with_data_dir(dir.path());
    let records = vec![
        raw("GX02Sf368", "Ökad  valfrihet för\nföräldrar", Some("av John Doe (p)"), MOTION_SF368),
        raw("short", "Kort", Some("av Någon (x)"), "Förslag till riksdagsbeslut kort."),
        raw(
            "generic",
            "med anledning av prop. 2009/10:1 Budgetpropositionen",
            Some("av Hans Backman (fp)"),
            MOTION_JU219,
        ),
        raw("nosub", "Personalpool för polisen", None, MOTION_JU219),
    ];
    write_raw_store(&records, &settings.raw_store_path()).unwrap();

    let rows = dataset::prep_training_dataset(&settings).unwrap();
    assert_eq!(rows, 1);

    let examples = dataset::read_training_examples(&settings.training_table_path()).unwrap();
    assert_eq!(examples.len(), 1);
    assert_eq!(examples[0].title, "Ökad valfrihet för föräldrar");
    assert!(examples[0]
        .text
        .starts_with("Föräldrapenning är den ersättning föräldrar får"));
    assert!(examples[0].text.ends_with("sina 480 dagar."));
}
