use motion_prep::data::catalogue::{parse_catalogue, select_archives, CatalogueEntry};

const CATALOGUE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<datasetlista>
  <dataset>
    <namn>mot-2018-2021</namn>
    <typ>mot</typ>
    <format>json</format>
    <filnamn>mot-2018-2021.json.zip</filnamn>
    <url>/dataset/dokument/mot-2018-2021.json.zip</url>
  </dataset>
  <dataset>
    <typ>mot</typ>
    <format>xml</format>
    <filnamn>mot-2018-2021.xml.zip</filnamn>
    <url>/dataset/dokument/mot-2018-2021.xml.zip</url>
  </dataset>
  <dataset>
    <typ>prop</typ>
    <format>json</format>
    <filnamn>prop-2018-2021.json.zip</filnamn>
    <url>/dataset/dokument/prop-2018-2021.json.zip</url>
  </dataset>
</datasetlista>"#;

#[test]
fn catalogue_parses_and_selects_motion_archives() {
    let entries = parse_catalogue(CATALOGUE).unwrap();
    assert_eq!(entries.len(), 3);

    let selected = select_archives(&entries, "mot", "json");
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].filnamn, "mot-2018-2021.json.zip");
    assert_eq!(
        selected[0].archive_url("https://data.riksdagen.se/"),
        "https://data.riksdagen.se/dataset/dokument/mot-2018-2021.json.zip"
    );
}

#[test]
fn minimal_catalogue_entry() {
    let xml = "<datasetlista><dataset><typ>mot</typ><format>json</format>\
               <filnamn>file1.json</filnamn><url>dataset/file1.zip</url></dataset></datasetlista>";
    let entries = parse_catalogue(xml).unwrap();
    assert_eq!(
        entries,
        vec![CatalogueEntry {
            typ: "mot".into(),
            format: "json".into(),
            filnamn: "file1.json".into(),
            url: "dataset/file1.zip".into(),
        }]
    );
    assert_eq!(
        entries[0].archive_url("https://data.riksdagen.se/"),
        "https://data.riksdagen.se/dataset/file1.zip"
    );
}

#[test]
fn local_name_stays_inside_archive_dir() {
    let entry = CatalogueEntry {
        filnamn: "../../etc/evil.zip".into(),
        ..CatalogueEntry::default()
    };
    assert_eq!(entry.local_name(), Some("evil.zip"));
    assert_eq!(CatalogueEntry::default().local_name(), None);
}
