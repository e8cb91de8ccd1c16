use std::fs;
use std::path::Path;

use c2sim_translate::diag::VecSink;
use c2sim_translate::report::{parse_report, translate_report, translate_report_with, ReportKind};

fn fixtures_dir() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures")
}

fn load_fixture(filename: &str) -> String {
    let path = Path::new(fixtures_dir()).join(filename);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

const PROLOG: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<MessageBody xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"",
    " xsi:schemaLocation=\"http://www.sisostds.org/schemas/C2SIM/1.1",
    " C2SIM_SMX_LOX_v1.0.0.xsd\"",
    " xmlns=\"http://www.sisostds.org/schemas/C2SIM/1.1\"><DomainMessageBody>"
);

const ENVELOPE_CLOSE: &str = "</DomainMessageBody></MessageBody>";

#[test]
fn position_report_rebuilds_exact_document() {
    let xml = load_fixture("position_report_009.xml");
    let expected = format!(
        "{}{}{}",
        PROLOG,
        concat!(
            "<ReportBody><FromSender>A</FromSender><ToReceiver>B</ToReceiver>",
            "<ReportContent><PositionReportContent><TimeOfObservation>",
            "<IsoDateTime>2019-06-20T12:00:00Z</IsoDateTime></TimeOfObservation>",
            "<Location><Coordinate><GeodeticCoordinate>",
            "<Latitude>1.0</Latitude><Longitude>2.0</Longitude>",
            "</GeodeticCoordinate></Coordinate></Location>",
            "<OperationalStatus><OperationalStatusCode>OPERATIONAL</OperationalStatusCode>",
            "</OperationalStatus><SubjectEntity>E1</SubjectEntity>",
            "</PositionReportContent></ReportContent>",
            "<ReportID>R1</ReportID><ReportingEntity>E2</ReportingEntity></ReportBody>"
        ),
        ENVELOPE_CLOSE
    );
    assert_eq!(translate_report(&xml), expected);
}

#[test]
fn position_field_values_appear_exactly_once() {
    let xml = load_fixture("position_report_009.xml");
    let output = translate_report(&xml);
    for leaf in [
        "<FromSender>A</FromSender>",
        "<ToReceiver>B</ToReceiver>",
        "<IsoDateTime>2019-06-20T12:00:00Z</IsoDateTime>",
        "<Latitude>1.0</Latitude>",
        "<Longitude>2.0</Longitude>",
        "<OperationalStatusCode>OPERATIONAL</OperationalStatusCode>",
        "<SubjectEntity>E1</SubjectEntity>",
        "<ReportID>R1</ReportID>",
        "<ReportingEntity>E2</ReportingEntity>",
    ] {
        assert_eq!(
            output.matches(leaf).count(),
            1,
            "expected exactly one {} in {}",
            leaf,
            output
        );
    }
}

#[test]
fn position_translation_emits_no_diagnostics() {
    let xml = load_fixture("position_report_009.xml");
    let mut sink = VecSink::new();
    translate_report_with(&xml, &mut sink);
    assert!(
        sink.messages.is_empty(),
        "unexpected diagnostics: {:?}",
        sink.messages
    );
}

#[test]
fn observation_report_nests_location_observation() {
    let xml = load_fixture("observation_report_009.xml");
    let output = translate_report(&xml);
    assert!(output.contains(concat!(
        "<ReportContent><ObservationReportContent><TimeOfObservation>",
        "<IsoDateTime>2019-06-21T08:30:00Z</IsoDateTime></TimeOfObservation>",
        "<Observation><LocationObservation>",
        "<ConfidenceLevel></ConfidenceLevel><UncertaintyInterval></UncertaintyInterval>",
        "<Location><Coordinate><GeodeticCoordinate>",
        "<Latitude>52.3</Latitude><Longitude>4.8</Longitude>",
        "</GeodeticCoordinate></Coordinate></Location>",
        "</LocationObservation></Observation></ObservationReportContent></ReportContent>"
    )));
    assert!(output.contains("<ReportID>OBS-7</ReportID>"));
    assert!(output.contains("<ReportingEntity>E9</ReportingEntity>"));
}

#[test]
fn observation_placeholders_stay_empty_regardless_of_input() {
    // 0.0.9 has no source for either element; even lookalike input content
    // must not leak into them.
    let xml = concat!(
        "<ReportBody><ObservationReportContent>",
        "<ConfidenceLevel>HIGH</ConfidenceLevel>",
        "<UncertaintyInterval>PT5M</UncertaintyInterval>",
        "<IsoDateTime>2019-06-21T00:00:00Z</IsoDateTime>",
        "</ObservationReportContent></ReportBody>"
    );
    let output = translate_report(xml);
    assert!(output.contains("<ConfidenceLevel></ConfidenceLevel>"));
    assert!(output.contains("<UncertaintyInterval></UncertaintyInterval>"));
    assert!(!output.contains("HIGH"));
    assert!(!output.contains("PT5M"));
}

#[test]
fn unrecognized_body_passes_through_with_one_diagnostic() {
    let xml = "<ReportBody>\n  <TaskStatus>done</TaskStatus>\n</ReportBody>";
    let mut sink = VecSink::new();
    let output = translate_report_with(xml, &mut sink);
    // The isolated, normalized chunk is appended byte-for-byte.
    assert!(output.contains("<ReportBody><TaskStatus>done</TaskStatus></ReportBody>"));
    assert_eq!(sink.messages.len(), 1, "diagnostics: {:?}", sink.messages);
    assert!(sink.messages[0].contains("neither position nor observation"));
}

#[test]
fn unterminated_field_yields_empty_value_and_one_diagnostic() {
    let xml = concat!(
        "<ReportBody><PositionReportContent>",
        "<FromSender>A",
        "</PositionReportContent></ReportBody>"
    );
    let mut sink = VecSink::new();
    let output = translate_report_with(xml, &mut sink);
    assert!(output.contains("<FromSender></FromSender>"));
    assert_eq!(sink.messages.len(), 1, "diagnostics: {:?}", sink.messages);
    assert!(sink.messages[0].contains("</FromSender>"));
}

#[test]
fn missing_report_body_still_produces_closed_envelope() {
    let mut sink = VecSink::new();
    let output = translate_report_with("<OrderBody>x</OrderBody>", &mut sink);
    assert_eq!(output, format!("{}{}", PROLOG, ENVELOPE_CLOSE));
    // Absent body is an unrecognized (empty) variant, not a tag mismatch.
    assert_eq!(sink.messages.len(), 1);
}

#[test]
fn parse_report_exposes_kind_and_fields() {
    let xml = load_fixture("position_report_009.xml");
    let mut sink = VecSink::new();
    let parsed = parse_report(&xml, &mut sink);
    assert_eq!(parsed.kind, ReportKind::Position);
    assert_eq!(parsed.fields.from_sender, "A");
    assert_eq!(parsed.fields.strength_percentage, "80");
    assert_eq!(parsed.fields.report_id, "R1");
    assert!(sink.messages.is_empty());
}

#[test]
fn translation_tolerates_partially_populated_reports() {
    // Only a subset of fields present; the rest come through empty.
    let xml = concat!(
        "<ReportBody><PositionReportContent>",
        "<Latitude>10.5</Latitude><Longitude>-3.25</Longitude>",
        "</PositionReportContent></ReportBody>"
    );
    let mut sink = VecSink::new();
    let output = translate_report_with(xml, &mut sink);
    assert!(output.contains("<Latitude>10.5</Latitude><Longitude>-3.25</Longitude>"));
    assert!(output.contains("<FromSender></FromSender>"));
    assert!(output.contains("<ReportID></ReportID>"));
    assert!(sink.messages.is_empty());
}
