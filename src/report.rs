use serde::Serialize;

use crate::diag::{DiagnosticSink, TracingSink};
use crate::extract::{copy_chunk, extract_value, remove_chunk, Extracted};
use crate::normalize::remove_whitespace;
use crate::scan::make_end_tag;

/// Fixed 1.0.0 document prolog and envelope opening.
const PROLOG: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
    <MessageBody xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
    xsi:schemaLocation=\"http://www.sisostds.org/schemas/C2SIM/1.1 \
    C2SIM_SMX_LOX_v1.0.0.xsd\" \
    xmlns=\"http://www.sisostds.org/schemas/C2SIM/1.1\"><DomainMessageBody>";

const ENVELOPE_CLOSE: &str = "</DomainMessageBody></MessageBody>";

/// No closing '>' so a ReportBody carrying attributes still matches.
const REPORT_BODY_START: &str = "<ReportBody";
const REPORT_BODY_END: &str = "</ReportBody>";

const POSITION_MARKER: &str = "<PositionReportContent>";
const OBSERVATION_MARKER: &str = "<ObservationReportContent>";

/// The flat 0.0.9 field record read out of a report body. Constructed per
/// translation and discarded once the output document is built.
///
/// A field whose tag is absent comes back as an empty string; that is
/// tolerated incompleteness, not an error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportFields {
    pub from_sender: String,
    pub to_receiver: String,
    pub time_of_observation: String,
    pub operational_status_code: String,
    /// Present in 0.0.9 but carried by neither 1.0.0 report shape.
    pub strength_percentage: String,
    pub latitude: String,
    pub longitude: String,
    pub subject_entity: String,
    pub report_id: String,
    pub reporting_entity: String,
}

/// Report content kind, decided by which marker the body chunk contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Position,
    Observation,
    Unrecognized,
}

impl ReportKind {
    pub fn of(chunk: &str) -> Self {
        if chunk.contains(POSITION_MARKER) {
            ReportKind::Position
        } else if chunk.contains(OBSERVATION_MARKER) {
            ReportKind::Observation
        } else {
            ReportKind::Unrecognized
        }
    }
}

/// Field record plus detected kind, for callers that want the parsed form
/// of a report rather than the rebuilt document.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedReport {
    pub kind: ReportKind,
    pub fields: ReportFields,
}

/// Translate a C2SIM 0.0.9 report document into its 1.0.0 equivalent,
/// reporting anomalies through `tracing`.
///
/// Translation never fails: missing fields come through empty, and a body
/// of unrecognized kind is passed through verbatim inside the envelope.
pub fn translate_report(xml: &str) -> String {
    translate_report_with(xml, &mut TracingSink)
}

/// As [`translate_report`], with an explicit diagnostic sink.
pub fn translate_report_with(xml: &str, sink: &mut dyn DiagnosticSink) -> String {
    // Pack out whitespace (and prefixes) so literal edits line up.
    let mut buffer = remove_whitespace(xml);
    debug_preview("normalized input: ", &buffer);

    let mut output = String::with_capacity(PROLOG.len() + buffer.len() + 256);
    output.push_str(PROLOG);

    // Isolate the part to process.
    let body = take_chunk(
        remove_chunk(&mut buffer, REPORT_BODY_START, REPORT_BODY_END),
        REPORT_BODY_START,
        REPORT_BODY_END,
        sink,
    );

    let fields = extract_fields(&body, sink);

    match ReportKind::of(&body) {
        ReportKind::Position => push_position_report(&mut output, &fields),
        ReportKind::Observation => push_observation_report(&mut output, &fields),
        ReportKind::Unrecognized => {
            sink.warn("report neither position nor observation");
            output.push_str(&body);
        }
    }

    output.push_str(ENVELOPE_CLOSE);
    output
}

/// Normalize a document, locate its report body without consuming it, and
/// read the field record and kind back out.
pub fn parse_report(xml: &str, sink: &mut dyn DiagnosticSink) -> ParsedReport {
    let buffer = remove_whitespace(xml);
    let body = take_chunk(
        copy_chunk(&buffer, REPORT_BODY_START, REPORT_BODY_END),
        REPORT_BODY_START,
        REPORT_BODY_END,
        sink,
    );
    ParsedReport {
        kind: ReportKind::of(&body),
        fields: extract_fields(&body, sink),
    }
}

/// Read every known 0.0.9 leaf field out of an isolated body chunk.
/// Non-destructive; fields may be read in any order.
pub fn extract_fields(body: &str, sink: &mut dyn DiagnosticSink) -> ReportFields {
    ReportFields {
        from_sender: take_value(body, "<FromSender>", sink),
        to_receiver: take_value(body, "<ToReceiver>", sink),
        time_of_observation: take_value(body, "<IsoDateTime>", sink),
        operational_status_code: take_value(body, "<OperationalStatusCode>", sink),
        strength_percentage: take_value(body, "<StrengthPercentage>", sink),
        latitude: take_value(body, "<Latitude>", sink),
        longitude: take_value(body, "<Longitude>", sink),
        subject_entity: take_value(body, "<SubjectEntity>", sink),
        report_id: take_value(body, "<ReportID>", sink),
        reporting_entity: take_value(body, "<ReportingEntity>", sink),
    }
}

fn take_value(chunk: &str, start_tag: &str, sink: &mut dyn DiagnosticSink) -> String {
    match extract_value(chunk, start_tag) {
        Extracted::EndMissing => {
            sink.warn(&format!(
                "start tag found: {} end tag not found: {}",
                start_tag,
                make_end_tag(start_tag)
            ));
            String::new()
        }
        other => other.into_text(),
    }
}

fn take_chunk(
    extracted: Extracted,
    start_tag: &str,
    end_tag: &str,
    sink: &mut dyn DiagnosticSink,
) -> String {
    if extracted == Extracted::EndMissing {
        sink.warn(&format!(
            "start tag found: {} end tag not found: {}",
            start_tag, end_tag
        ));
    }
    extracted.into_text()
}

fn push_leaf(out: &mut String, name: &str, value: &str) {
    out.push('<');
    out.push_str(name);
    out.push('>');
    out.push_str(value);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Fixed 1.0.0 nesting for a position report. ReportID is carried along
/// even though 0.0.9 did not place it in schema order.
fn push_position_report(out: &mut String, fields: &ReportFields) {
    out.push_str("<ReportBody>");
    push_leaf(out, "FromSender", &fields.from_sender);
    push_leaf(out, "ToReceiver", &fields.to_receiver);
    out.push_str("<ReportContent><PositionReportContent><TimeOfObservation>");
    push_leaf(out, "IsoDateTime", &fields.time_of_observation);
    out.push_str("</TimeOfObservation><Location><Coordinate><GeodeticCoordinate>");
    push_leaf(out, "Latitude", &fields.latitude);
    push_leaf(out, "Longitude", &fields.longitude);
    out.push_str("</GeodeticCoordinate></Coordinate></Location><OperationalStatus>");
    push_leaf(out, "OperationalStatusCode", &fields.operational_status_code);
    out.push_str("</OperationalStatus>");
    push_leaf(out, "SubjectEntity", &fields.subject_entity);
    out.push_str("</PositionReportContent></ReportContent>");
    push_leaf(out, "ReportID", &fields.report_id);
    push_leaf(out, "ReportingEntity", &fields.reporting_entity);
    out.push_str("</ReportBody>");
}

/// Fixed 1.0.0 nesting for a location observation report. ConfidenceLevel
/// and UncertaintyInterval have no 0.0.9 source and stay empty; 0.0.9 also
/// has no identity for the observed party, so none is emitted.
fn push_observation_report(out: &mut String, fields: &ReportFields) {
    out.push_str("<ReportBody>");
    push_leaf(out, "FromSender", &fields.from_sender);
    push_leaf(out, "ToReceiver", &fields.to_receiver);
    out.push_str("<ReportContent><ObservationReportContent><TimeOfObservation>");
    push_leaf(out, "IsoDateTime", &fields.time_of_observation);
    out.push_str("</TimeOfObservation><Observation><LocationObservation>");
    out.push_str("<ConfidenceLevel></ConfidenceLevel><UncertaintyInterval></UncertaintyInterval>");
    out.push_str("<Location><Coordinate><GeodeticCoordinate>");
    push_leaf(out, "Latitude", &fields.latitude);
    push_leaf(out, "Longitude", &fields.longitude);
    out.push_str("</GeodeticCoordinate></Coordinate></Location>");
    out.push_str("</LocationObservation></Observation></ObservationReportContent></ReportContent>");
    push_leaf(out, "ReportID", &fields.report_id);
    push_leaf(out, "ReportingEntity", &fields.reporting_entity);
    out.push_str("</ReportBody>");
}

/// Log up to the first 400 characters of a document at debug level.
fn debug_preview(title: &str, text: &str) {
    let cut = text
        .char_indices()
        .nth(400)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    tracing::debug!("{}{}", title, &text[..cut]);
}
