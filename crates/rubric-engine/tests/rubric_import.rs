use rubric_engine::rubrics::export::{render_markdown, write_csv, ExportError};
use rubric_engine::rubrics::{
    ParseError, RubricId, RubricImporter, RubricService, RubricServiceError, TableFormat,
};

const SCIENCE_FAIR: &str = "\
| Criteria | Needs work | Meets expectations |
| --- | --- | --- |
| Question | Not testable | Testable and focused |
| Data | Sparse | Repeated trials |
| Display | Cluttered | Clear and labeled |
";

#[test]
fn markdown_three_by_two_table_parses_positionally() {
    let table = RubricImporter::default()
        .parse(TableFormat::Markdown, SCIENCE_FAIR)
        .expect("well-formed table");

    assert_eq!(table.criteria.len(), 3);
    for criterion in &table.criteria {
        assert!((criterion.weight - 1.0 / 3.0).abs() < 1e-12);
    }
    assert_eq!(
        table
            .levels
            .iter()
            .map(|level| level.score_value)
            .collect::<Vec<_>>(),
        vec![1.0, 2.0]
    );

    let expected = [
        (0, 0, "Not testable"),
        (0, 1, "Testable and focused"),
        (1, 0, "Sparse"),
        (1, 1, "Repeated trials"),
        (2, 0, "Cluttered"),
        (2, 1, "Clear and labeled"),
    ];
    assert_eq!(table.cells.len(), expected.len());
    for (cell, (criterion, level, content)) in table.cells.iter().zip(expected) {
        assert_eq!(cell.criterion, criterion);
        assert_eq!(cell.level, level);
        assert_eq!(cell.content, content);
    }
}

#[test]
fn csv_quoted_commas_stay_in_one_field() {
    let raw = "\"Criteria\",\"Level 1\",\"Level 2\"\n\"Criterion A\",\"Level 1\",\"has, comma\"\n";
    let table = RubricImporter::default()
        .parse(TableFormat::Csv, raw)
        .expect("csv parses");

    assert_eq!(table.criteria[0].name, "Criterion A");
    assert_eq!(table.cells.len(), 2);
    assert_eq!(table.cells[1].content, "has, comma");
}

#[test]
fn header_only_markdown_is_a_parse_error() {
    let error = RubricService::default()
        .import(
            RubricId::new("empty"),
            "Empty",
            TableFormat::Markdown,
            "| Criteria | Low | High |\n|---|---|---|\n\n",
        )
        .expect_err("no data rows");

    match error {
        RubricServiceError::Parse(ParseError::InsufficientRows) => {}
        other => panic!("expected insufficient rows, got {other:?}"),
    }
}

#[test]
fn exported_markdown_imports_back_to_the_same_grid() {
    let service = RubricService::default();
    let rubric = service
        .import(
            RubricId::new("fair"),
            "Science fair",
            TableFormat::Markdown,
            SCIENCE_FAIR,
        )
        .expect("import");

    let rendered = render_markdown(&rubric).expect("markdown export");
    let reimported = service
        .import(
            RubricId::new("fair"),
            "Science fair",
            TableFormat::Markdown,
            &rendered,
        )
        .expect("re-import");

    assert_eq!(reimported, rubric);
}

#[test]
fn exported_csv_imports_back_to_the_same_grid() {
    let service = RubricService::default();
    let rubric = service
        .import(
            RubricId::new("fair"),
            "Science fair",
            TableFormat::Markdown,
            SCIENCE_FAIR,
        )
        .expect("import");

    let mut buffer = Vec::new();
    write_csv(&rubric, &mut buffer).expect("csv export");
    let rendered = String::from_utf8(buffer).expect("utf8");

    let reimported = service
        .import(RubricId::new("fair"), "Science fair", TableFormat::Csv, &rendered)
        .expect("re-import");
    assert_eq!(reimported.cells, rubric.cells);
    assert_eq!(reimported.levels, rubric.levels);
}

#[test]
fn piped_cells_refuse_markdown_but_survive_csv() {
    let service = RubricService::default();
    let rubric = service
        .import(
            RubricId::new("pipes"),
            "Pipes",
            TableFormat::Csv,
            "C,L1,L2\nA,x | y,a2\n",
        )
        .expect("import");
    assert_eq!(rubric.cells[0].content, "x | y");
    assert_eq!(rubric.cells[1].content, "a2");

    assert!(matches!(
        render_markdown(&rubric),
        Err(ExportError::PipeInMarkdown { .. })
    ));

    let mut buffer = Vec::new();
    write_csv(&rubric, &mut buffer).expect("csv export");
    let rendered = String::from_utf8(buffer).expect("utf8");
    let reimported = service
        .import(RubricId::new("pipes"), "Pipes", TableFormat::Csv, &rendered)
        .expect("re-import");
    assert_eq!(reimported.cells, rubric.cells);
}
