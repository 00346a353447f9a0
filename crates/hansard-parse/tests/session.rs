use hansard_core::{Member, SectionCategory, SourceFormat};
use hansard_parse::{HansardParser, ParseError, RawPayload};
use pretty_assertions::assert_eq;
use serde_json::json;

fn parser() -> HansardParser {
    HansardParser::with_defaults().unwrap()
}

fn speaker_names(section: &hansard_core::Section) -> Vec<&str> {
    section.speakers.iter().map(|m| m.name.as_str()).collect()
}

#[test]
fn member_resolves_once_despite_salutation_casing() {
    let payload = json!({
        "metadata": { "sittingDate": "2024-09-10" },
        "attendanceList": [
            { "mpName": "Ms Jessica Tan Soon Neo (East Coast)", "attendance": true }
        ],
        "takesSectionVOList": [{
            "sectionType": "OA",
            "title": "Childcare Subsidies",
            "content": "<p><strong>Ms Jessica Tan Soon Neo (East Coast)</strong> asked the Minister.</p>\
                        <p><strong>MS JESSICA TAN SOON NEO (East Coast):</strong> A supplementary.</p>",
            "sectionId": 4312
        }]
    });
    let session = parser()
        .parse_json("10-09-2024", &payload.to_string())
        .unwrap();

    let sections = session.sections();
    assert_eq!(sections.len(), 1);
    assert_eq!(
        sections[0].speakers,
        vec![Member::new(
            "Jessica Tan Soon Neo",
            Some("East Coast".into()),
            None
        )]
    );
}

#[test]
fn structured_sitting_end_to_end() {
    let statement = format!(
        "<p><strong>Mr Ong Ye Kung:</strong> {}</p>",
        "Sir, the Ministry will expand vaccination coverage. ".repeat(12)
    );
    let payload = json!({
        "metadata": {
            "sittingDate": "2024-09-10",
            "sittingNO": "136",
            "parlimentNO": 14,
            "sessionNO": 2,
            "volumeNO": 95.0
        },
        "attendanceList": [
            { "mpName": "Mr SPEAKER (Mr Seah Kian Peng (Marine Parade-Braddell Heights)).", "attendance": true },
            { "mpName": "Mr Ong Ye Kung (Sembawang GRC), Minister for Health", "attendance": true },
            { "mpName": "Mr Gerald Giam Yean Song (Aljunied GRC)", "attendance": true },
            { "mpName": "Ms He Ting Ru (Sengkang GRC)", "attendance": false }
        ],
        "takesSectionVOList": [
            {
                "sectionType": "OA",
                "title": "Hospital Waiting Times",
                "content": "<p><strong>Mr Gerald Giam Yean Song</strong> asked the Minister for Health.</p>\
                            <p><strong>Mr SPEAKER:</strong> Minister.</p>",
                "sectionId": "oa-1",
                "reportType": "Oral Answers to Questions"
            },
            { "sectionType": "OS", "title": "Leave of Absence", "content": "<p>Granted.</p>" },
            { "sectionType": "OS", "title": "Ministerial Statement on Vaccination", "content": statement },
            { "sectionType": "BP", "title": "Clarification on Healthcare Services Bill", "content": "<p>Clarified.</p>" },
            { "sectionType": "PRAYERS", "title": "Prayers", "content": "<p>Prayers.</p>" },
            {
                "sectionType": "OA",
                "title": "Hospital Waiting Times",
                "content": "<p><strong>Mr Ong Ye Kung:</strong> The median wait has fallen.</p>",
                "sectionId": "oa-2"
            }
        ]
    });
    let session = parser()
        .parse_json("10-09-2024", &payload.to_string())
        .unwrap();

    let metadata = session.metadata();
    assert_eq!(session.date(), "10-09-2024");
    assert_eq!(metadata.sitting_number, Some(136));
    assert_eq!(metadata.parliament_number, Some(14));
    assert_eq!(metadata.session_number, Some(2));
    assert_eq!(metadata.volume_number, Some(95));
    assert_eq!(metadata.format, Some(SourceFormat::New));

    assert_eq!(session.present_members().len(), 3);
    assert_eq!(session.absent_members()[0].name, "He Ting Ru");

    let sections = session.sections();
    let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Hospital Waiting Times",
            "Ministerial Statement on Vaccination",
            "Clarification on Healthcare Services Bill",
        ]
    );

    let question = &sections[0];
    assert_eq!(question.category, SectionCategory::Question);
    assert_eq!(question.order, 0);
    assert_eq!(speaker_names(question), vec!["Gerald Giam Yean Song", "Ong Ye Kung"]);
    assert_eq!(
        question.source_url.as_deref(),
        Some("https://sprs.parl.gov.sg/search/#/sprs3topic?reportid=oa-1")
    );
    assert!(question.display_text.contains("<hr/>"));
    assert!(question.plain_text.contains("\n\n---\n\n"));

    assert_eq!(sections[1].category, SectionCategory::Motion);
    assert_eq!(speaker_names(&sections[1]), vec!["Ong Ye Kung"]);
    assert_eq!(sections[2].category, SectionCategory::Clarification);
    assert!(sections[2].speakers.is_empty());
}

#[test]
fn legacy_sitting_end_to_end() {
    let html = "<html><head>\
                <meta name=\"Parl_No\" content=\"9\">\
                <meta name=\"Sess_No\" content=\"1\">\
                <meta name=\"Sit_Date\" content=\"2001-10-15\">\
                </head><body>\
                <p>PRESENT:</p>\
                <p>Mr SPEAKER (Mr Abdullah Tarmugi (Siglap)).</p>\
                <p>Mr Low Thia Khiang (Hougang)</p>\
                <p>ABSENT:</p>\
                <p>Mr Chiam See Tong (Potong Pasir)</p>\
                <p>IN ATTENDANCE:</p>\
                <p><b>Mr Low Thia Khiang:</b> Sir, may I ask the Minister about bus fares.</p>\
                <p><b>The Minister for Transport (Mr Yeo Cheow Tong):</b> Mr Speaker, Sir, fares are reviewed yearly.</p>\
                <p><b>Mr Chiam See Tong:</b> A further question on the fares review.</p>\
                </body></html>";
    let payload = RawPayload {
        html_full_content: Some(html.into()),
        ..Default::default()
    };
    let session = parser().parse("15-10-2001", &payload).unwrap();

    let metadata = session.metadata();
    assert_eq!(metadata.format, Some(SourceFormat::Old));
    assert_eq!(metadata.parliament_number, Some(9));
    assert_eq!(metadata.session_number, Some(1));
    assert_eq!(session.date(), "15-10-2001");

    let present: Vec<&str> = session
        .present_members()
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(present, vec!["Abdullah Tarmugi", "Low Thia Khiang"]);
    assert_eq!(session.absent_members()[0].name, "Chiam See Tong");

    // Two pseudo-sections share one title and fold into one.
    let sections = session.sections();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].section_type, "DEBATE");
    assert_eq!(sections[0].title, "Parliamentary Question");
    assert_eq!(sections[0].category, SectionCategory::Other);
    assert_eq!(sections[0].order, 0);
    assert_eq!(
        speaker_names(&sections[0]),
        vec!["Low Thia Khiang", "Chiam See Tong"]
    );
    let plain = &sections[0].plain_text;
    let separator = plain.find("\n\n---\n\n").unwrap();
    assert!(plain.find("fares are reviewed yearly").unwrap() < separator);
    assert!(plain.find("A further question").unwrap() > separator);
    assert!(sections[0].display_text.contains("<hr/>"));
    assert!(sections[0].source_url.is_none());
}

#[test]
fn null_attendance_fields_do_not_lose_the_sitting() {
    let payload = json!({
        "attendanceList": [
            { "mpName": "Mr Pritam Singh (Aljunied GRC)", "attendance": true },
            { "mpName": null, "attendance": true },
            { "mpName": "Ms Sylvia Lim (Aljunied GRC)", "attendance": null }
        ],
        "takesSectionVOList": [{
            "sectionType": "OA",
            "title": "Town Council Finances",
            "content": "<p><strong>Mr Pritam Singh:</strong> asked the Minister.</p>"
        }]
    });
    let session = parser()
        .parse_json("10-09-2024", &payload.to_string())
        .unwrap();

    let present: Vec<&str> = session
        .present_members()
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(present, vec!["Pritam Singh"]);
    assert_eq!(session.absent_members()[0].name, "Sylvia Lim");
    assert_eq!(speaker_names(&session.sections()[0]), vec!["Pritam Singh"]);
}

#[test]
fn unknown_payload_is_rejected() {
    let payload = json!({ "takesSectionVOList": [], "htmlFullContent": "" });
    let err = parser()
        .parse_json("10-09-2024", &payload.to_string())
        .unwrap_err();
    assert!(matches!(err, ParseError::UnknownFormat));
}

#[test]
fn sections_without_roster_have_no_speakers() {
    let payload = json!({
        "takesSectionVOList": [{
            "sectionType": "WA",
            "title": "Flood Defences",
            "content": "<p><strong>Mr Desmond Lee:</strong> Written answer.</p>"
        }]
    });
    let session = parser()
        .parse_json("10-09-2024", &payload.to_string())
        .unwrap();
    assert!(session.attendance().is_empty());
    assert_eq!(session.sections().len(), 1);
    assert!(session.sections()[0].speakers.is_empty());
}

#[test]
fn session_serialises_categories_as_snake_case() {
    let payload = json!({
        "takesSectionVOList": [{
            "sectionType": "OS",
            "title": "Haze",
            "content": "<p>x</p>",
            "reportType": "Matter Raised On Adjournment Motion"
        }]
    });
    let session = parser()
        .parse_json("10-09-2024", &payload.to_string())
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&session.to_json().unwrap()).unwrap();
    assert_eq!(value["sections"][0]["category"], "adjournment_motion");
    assert_eq!(value["metadata"]["format"], "new");
}

#[test]
fn configured_minimum_changes_filtering() {
    let config = hansard_core::ParserConfig::from_toml_str("min_statement_chars = 5").unwrap();
    let parser = HansardParser::new(config).unwrap();
    let payload = json!({
        "takesSectionVOList": [{ "sectionType": "WS", "title": "Written Statement", "content": "<p>Short statement.</p>" }]
    });
    let session = parser.parse_json("10-09-2024", &payload.to_string()).unwrap();
    assert_eq!(session.sections().len(), 1);
}
