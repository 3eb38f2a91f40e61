//! Record parsers for the diagram text format.
//!
//! Each record shape is an explicit small parser over `&str` with
//! fixed-field extraction, rather than one monolithic pattern. The framing
//! (`<id>]Marker$ ... ;`) is handled by [`winnow`] combinators; the
//! positional payload of relation records is split and picked apart by
//! index.

use winnow::{
    Parser,
    ascii::dec_int,
    combinator::{delimited, separated_pair},
    error::{ContextError, ErrMode, StrContext},
    token::take_till,
};

use concord_core::{
    ClassNode, RelationEdge, RelationKind,
    element::{NONE_SENTINEL, Origin},
};

use crate::error::RecordError;

type Input<'src> = &'src str;
type IResult<O> = Result<O, ErrMode<ContextError>>;

/// Payload field positions of a relation record, counting from the first
/// field after `ClassRelationLink$`. Positions 3, 7, 8 are the empty
/// separators; 4 and 5 are the display styles, parsed but not retained.
const FIELD_SOURCE: usize = 0;
const FIELD_TARGET: usize = 1;
const FIELD_KIND: usize = 2;
const FIELD_SOURCE_MULTIPLICITY: usize = 6;
const FIELD_TARGET_MULTIPLICITY: usize = 9;

/// Parse an angle-bracketed id field: `<id>`.
fn angle_field<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    delimited('<', take_till(0.., '>'), '>')
        .context(StrContext::Label("id field"))
        .parse_next(input)
}

/// Parse a coordinate pair: `(x,y)`.
fn coordinates(input: &mut Input<'_>) -> IResult<(i32, i32)> {
    delimited('(', separated_pair(dec_int, ',', dec_int), ')')
        .context(StrContext::Label("coordinates"))
        .parse_next(input)
}

/// Parse a full class record line into its raw pieces.
fn class_record<'src>(input: &mut Input<'src>) -> IResult<(&'src str, i32, i32, &'src str, &'src str)> {
    let id = angle_field(input)?;
    let _ = "]Class$".parse_next(input)?;
    let (x, y) = coordinates(input)?;
    let _ = '!'.parse_next(input)?;
    let name = take_till(0.., '!').parse_next(input)?;
    let _ = '!'.parse_next(input)?;
    let attr_section = take_till(0.., ';').parse_next(input)?;
    let _ = ';'.parse_next(input)?;
    Ok((id, x, y, name, attr_section))
}

/// Parse a relation record frame, leaving the `!`-delimited payload intact.
fn relation_frame<'src>(input: &mut Input<'src>) -> IResult<(&'src str, &'src str)> {
    let id = angle_field(input)?;
    let _ = "]ClassRelationLink$".parse_next(input)?;
    let payload = take_till(0.., ';').parse_next(input)?;
    let _ = ';'.parse_next(input)?;
    Ok((id, payload))
}

/// Split an attribute section into attribute strings.
///
/// The section is either empty or `!-attr1%-attr2%...%`; anything that does
/// not fit that shape is tolerated as an empty attribute list.
fn parse_attributes(section: &str) -> Vec<String> {
    let body = section.strip_prefix('!').unwrap_or(section);
    let Some(body) = body.strip_prefix('-') else {
        return Vec::new();
    };
    let body = body.strip_suffix('%').unwrap_or(body);
    if body.is_empty() {
        return Vec::new();
    }
    body.split("%-").map(str::to_string).collect()
}

/// A payload field, with absent and empty fields mapped to the sentinel.
fn multiplicity(field: Option<&&str>) -> String {
    match field {
        Some(value) if !value.is_empty() => (*value).to_string(),
        _ => NONE_SENTINEL.to_string(),
    }
}

/// Strip the angle brackets of an endpoint reference field.
fn endpoint(field: Option<&&str>) -> Option<String> {
    let value = field?;
    let id = value.strip_prefix('<')?.strip_suffix('>')?;
    Some(id.to_string())
}

/// Parse one class record line.
///
/// # Errors
///
/// Returns [`RecordError::MalformedClass`] when the line does not match the
/// class record grammar. A malformed attribute section alone is not an
/// error; it decodes as an empty attribute list.
pub fn parse_class_record(line: &str) -> Result<ClassNode, RecordError> {
    let (id, x, y, name, attr_section) = class_record
        .parse(line)
        .map_err(|_| RecordError::MalformedClass)?;

    Ok(ClassNode::new(
        id,
        name,
        parse_attributes(attr_section),
        x,
        y,
    ))
}

/// Parse one relation record line, stamping it with `origin`.
///
/// Kind and multiplicity fields are optional: absent, empty, or
/// unrecognized values decode as no kind and the `"None"` sentinel. The two
/// endpoint references are required.
///
/// # Errors
///
/// Returns [`RecordError::MalformedRelation`] when the frame does not match
/// or either endpoint reference is missing its angle brackets.
pub fn parse_relation_record(line: &str, origin: Origin) -> Result<RelationEdge, RecordError> {
    let (id, payload) = relation_frame
        .parse(line)
        .map_err(|_| RecordError::MalformedRelation)?;

    let fields: Vec<&str> = payload.split('!').collect();

    let source = endpoint(fields.get(FIELD_SOURCE)).ok_or(RecordError::MalformedRelation)?;
    let target = endpoint(fields.get(FIELD_TARGET)).ok_or(RecordError::MalformedRelation)?;
    let kind = fields
        .get(FIELD_KIND)
        .and_then(|value| value.parse::<RelationKind>().ok());

    Ok(RelationEdge::new(
        id,
        source,
        target,
        kind,
        multiplicity(fields.get(FIELD_SOURCE_MULTIPLICITY)),
        multiplicity(fields.get(FIELD_TARGET_MULTIPLICITY)),
        origin,
    ))
}
