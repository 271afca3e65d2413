use restext::{
    DiagnosticCode, LineOutcome, ParserConfig, ResourceParser, Severity, SourceLine,
    diagnostics::Diagnostic,
};

fn parse_line(text: &str) -> (LineOutcome, Vec<Diagnostic>) {
    ResourceParser::default().parse_line_collect(SourceLine::new("Strings.restext", 0, text))
}

fn parse_value(value: &str) -> (LineOutcome, Vec<Diagnostic>) {
    parse_line(&format!("Key = {}", value))
}

fn codes(diagnostics: &[Diagnostic]) -> Vec<DiagnosticCode> {
    diagnostics.iter().map(|d| d.code).collect()
}

#[test]
fn test_positional_hole() {
    let value = "Hello {0}!";
    let (outcome, diagnostics) = parse_value(value);
    assert!(diagnostics.is_empty());
    let item = outcome.into_item().unwrap();
    assert_eq!(item.holes.len(), 1);
    let hole = &item.holes[0];
    assert_eq!(hole.name, "arg0");
    assert_eq!(hole.r#type, None);
    assert_eq!(hole.index, value.find('{').unwrap());
    assert_eq!(hole.length, 3);
}

#[test]
fn test_named_and_typed_hole() {
    let (outcome, diagnostics) = parse_value("Hello {Name:Type}!");
    assert!(diagnostics.is_empty());
    let item = outcome.into_item().unwrap();
    assert_eq!(item.holes.len(), 1);
    assert_eq!(item.holes[0].name, "name");
    assert_eq!(item.holes[0].r#type.as_deref(), Some("Type"));
}

#[test]
fn test_conflicting_type_constraint() {
    let (outcome, diagnostics) = parse_value("Hello {0:int} and {0:string}!");
    assert_eq!(outcome, LineOutcome::Failed);
    assert_eq!(
        codes(&diagnostics),
        vec![DiagnosticCode::ConflictingTypeConstraint]
    );
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(
        diagnostics[0].message(),
        "Conflicting type constraint for resource hole with name 'arg0'."
    );
}

#[test]
fn test_typed_and_untyped_conflict() {
    let (outcome, diagnostics) = parse_value("{Name} and {Name:string}");
    assert_eq!(outcome, LineOutcome::Failed);
    assert_eq!(
        codes(&diagnostics),
        vec![DiagnosticCode::ConflictingTypeConstraint]
    );
}

#[test]
fn test_multiple_equals_at_second_delimiter() {
    let line = "a = b = c";
    let (outcome, diagnostics) = parse_line(line);
    assert_eq!(outcome, LineOutcome::Failed);
    assert_eq!(
        codes(&diagnostics),
        vec![DiagnosticCode::MultipleEqualsDelimiters]
    );
    assert_eq!(diagnostics[0].start, line.rfind('=').unwrap());
}

#[test]
fn test_empty_hole() {
    let (outcome, diagnostics) = parse_value("Hello {}!");
    assert_eq!(outcome, LineOutcome::Failed);
    assert_eq!(codes(&diagnostics), vec![DiagnosticCode::EmptyHole]);
}

#[test]
fn test_no_type_in_hole() {
    let (outcome, diagnostics) = parse_value("Hello {name:}!");
    assert_eq!(outcome, LineOutcome::Failed);
    assert_eq!(codes(&diagnostics), vec![DiagnosticCode::NoTypeInHole]);
    assert_eq!(diagnostics[0].code.id(), "RG0005");
}

#[test]
fn test_no_name_in_hole() {
    let (outcome, diagnostics) = parse_value("Hello {:int}!");
    assert_eq!(outcome, LineOutcome::Failed);
    assert_eq!(codes(&diagnostics), vec![DiagnosticCode::NoNameInHole]);
}

#[test]
fn test_indexed_and_typed_holes_in_order() {
    let (outcome, diagnostics) = parse_value("Hello {0} and {1:string}!");
    assert!(diagnostics.is_empty());
    let item = outcome.into_item().unwrap();
    let holes: Vec<(&str, Option<&str>)> = item
        .holes
        .iter()
        .map(|h| (h.name.as_str(), h.r#type.as_deref()))
        .collect();
    assert_eq!(holes, vec![("arg0", None), ("arg1", Some("string"))]);
}

#[test]
fn test_line_without_equals_is_no_match() {
    let (outcome, diagnostics) = parse_line("Just some text {with} holes");
    assert_eq!(outcome, LineOutcome::NoMatch);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_unterminated_trailing_hole_ends_scan() {
    let (outcome, diagnostics) = parse_value("Hello {0}, {unterminated");
    assert!(diagnostics.is_empty());
    let item = outcome.into_item().unwrap();
    assert_eq!(item.holes.len(), 1);
}

#[test]
fn test_duplicate_names_with_matching_types_are_kept() {
    let (outcome, diagnostics) = parse_value("{Count:int} of {count:int}");
    assert!(diagnostics.is_empty());
    let item = outcome.into_item().unwrap();
    assert_eq!(item.holes.len(), 2);
    assert_eq!(item.parameters(&ParserConfig::csharp()).len(), 1);
}

#[test]
fn test_diagnostics_in_scan_order() {
    let line = "Key = {} {:x} {y:} {}";
    let (outcome, diagnostics) = parse_line(line);
    assert_eq!(outcome, LineOutcome::Failed);
    assert_eq!(
        codes(&diagnostics),
        vec![
            DiagnosticCode::EmptyHole,
            DiagnosticCode::NoNameInHole,
            DiagnosticCode::NoTypeInHole,
            DiagnosticCode::EmptyHole,
        ]
    );
    let starts: Vec<usize> = diagnostics.iter().map(|d| d.start).collect();
    let mut sorted = starts.clone();
    sorted.sort();
    assert_eq!(starts, sorted);
    for diagnostic in &diagnostics {
        assert_eq!(&line[diagnostic.start..=diagnostic.start], "{");
        assert_eq!(&line[diagnostic.end..=diagnostic.end], "}");
    }
}

#[test]
fn test_callback_sink() {
    let parser = ResourceParser::default();
    let mut reported = Vec::new();
    let outcome = parser.parse_line(
        SourceLine::new("Strings.restext", 3, "Key = {}"),
        &mut |d: Diagnostic| reported.push((d.line, d.code)),
    );
    assert_eq!(outcome, LineOutcome::Failed);
    assert_eq!(reported, vec![(3, DiagnosticCode::EmptyHole)]);
}

#[test]
fn test_rust_config_escapes_keywords() {
    let parser = ResourceParser::new(ParserConfig::rust());
    let (outcome, _) = parser.parse_line_collect(SourceLine::new(
        "p",
        0,
        "Key = {Type} {Match:int} {Crate} {Self} {Super}",
    ));
    let item = outcome.into_item().unwrap();
    let names: Vec<&str> = item.holes.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["r#type", "r#match", "crate_", "self_", "super_"]
    );
}
