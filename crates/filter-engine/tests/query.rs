use filter_engine::{
    Clause, MemoryQuery, Page, PageRequest, Predicate, QueryCompiler, QueryFilterError, Record,
    RegistryConfig, SortDirection, Value, paginate,
};
use filter_syntax::SyntaxError;

const REGISTRY: &str = r#"{
    "fields": [
        { "key": "id", "column": "p.id", "type": "number" },
        { "key": "name", "column": "p.name", "type": "text" },
        { "key": "active", "column": "p.active", "type": "boolean" },
        { "key": "joined", "column": "p.joined_at", "type": "datetime" },
        { "key": "tags", "column": "p.tags", "type": "text" }
    ],
    "default_sort": [{ "key": "id", "direction": "desc" }]
}"#;

fn registry() -> filter_engine::FieldRegistry {
    RegistryConfig::from_json(REGISTRY)
        .expect("valid registry json")
        .build()
        .expect("valid registry")
}

fn dataset() -> Vec<Record> {
    let at = |s: &str| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();

    vec![
        Record::new()
            .with("p.id", 1)
            .with("p.name", "Ann: the first")
            .with("p.active", true)
            .with("p.joined_at", at("2023-01-10 09:00:00"))
            .with("p.tags", vec!["admin", "ops"]),
        Record::new()
            .with("p.id", 2)
            .with("p.name", "Bob")
            .with("p.active", false)
            .with("p.joined_at", at("2023-06-01 12:30:00"))
            .with("p.tags", vec!["ops"]),
        Record::new()
            .with("p.id", 3)
            .with("p.name", "Joanna")
            .with("p.active", true)
            .with("p.joined_at", at("2024-02-29 00:00:00")),
        Record::new()
            .with("p.id", 4)
            .with("p.name", "100% Carl")
            .with("p.active", true),
    ]
}

fn run(filter: &str) -> Vec<i64> {
    let registry = registry();
    let compiled = QueryCompiler::new(&registry)
        .compile(Some(filter), Some("id:asc"))
        .unwrap_or_else(|err| panic!("{filter}: {err}"));

    let mut query = MemoryQuery::new(dataset());
    compiled.apply_to(&mut query);
    ids(&filter_engine::QueryExecutor::execute(&query).unwrap())
}

fn ids(records: &[Record]) -> Vec<i64> {
    records
        .iter()
        .map(|r| match r.get("p.id") {
            Value::Int(id) => *id,
            other => panic!("unexpected id {other:?}"),
        })
        .collect()
}

#[test]
fn and_binds_tighter_than_or() {
    assert_eq!(run("eq:id:1 | eq:id:2 & eq:active:true"), vec![1]);
    assert_eq!(run("(eq:id:1 | eq:id:2) & eq:active:true"), vec![1]);
    assert_eq!(run("eq:id:2 & eq:active:false | eq:id:4"), vec![2, 4]);
}

#[test]
fn connectives_are_commutative_over_the_dataset() {
    let pairs = [
        ("like:name:\"an\"", "eq:active:true"),
        ("gt:id:1", "lt:joined:\"2024-01-01\""),
        ("is-null:joined:", "is-member-of:tags:ops"),
    ];

    for (a, b) in pairs {
        assert_eq!(run(&format!("{a} & {b}")), run(&format!("{b} & {a}")));
        assert_eq!(run(&format!("{a} | {b}")), run(&format!("{b} | {a}")));
    }
}

#[test]
fn quoted_and_bare_text_are_equivalent() {
    assert_eq!(run(r#"eq:name:"Bob""#), run("eq:name:Bob"));
    assert_eq!(run(r#"eq:name:"Bob""#), vec![2]);
}

#[test]
fn values_keep_embedded_colons() {
    assert_eq!(run(r#"eq:name:"Ann: the first""#), vec![1]);
    assert_eq!(run("eq:joined:2023-06-01 12:30:00"), vec![2]);
}

#[test]
fn like_is_case_insensitive_substring() {
    assert_eq!(run(r#"like:name:"AN""#), vec![1, 3]);
    assert_eq!(run(r#"not-like:name:"an""#), vec![2, 4]);
    assert_eq!(run("like:name:100%"), vec![4]);
    assert_eq!(run("like:name:0%c"), Vec::<i64>::new());
}

#[test]
fn datetime_ranges() {
    assert_eq!(run(r#"gte:joined:"2023-06-01""#), vec![2, 3]);
    assert_eq!(run("lt:joined:2023-06-01T12:30:00Z"), vec![1]);
    assert_eq!(run("is-null:joined: | is-not-null:tags:"), vec![1, 2, 4]);
}

#[test]
fn member_of_uses_raw_value() {
    assert_eq!(run("is-member-of:tags:ops"), vec![1, 2]);
    assert_eq!(run(r#"is-member-of:tags:"ops""#), Vec::<i64>::new());
}

#[test]
fn illegal_operations_are_rejected() {
    let registry = registry();
    let compiler = QueryCompiler::new(&registry);

    for filter in ["like:id:1", "gt:name:a", "lt:active:true", "like:joined:2023"] {
        assert!(
            matches!(
                compiler.filter(filter),
                Err(QueryFilterError::UnsupportedOperation { .. })
            ),
            "{filter}"
        );
    }
    assert!(matches!(
        compiler.filter("eq:id:abc"),
        Err(QueryFilterError::ValueFormat { .. })
    ));
    assert!(matches!(
        compiler.filter("eq:joined:yesterday"),
        Err(QueryFilterError::ValueFormat { .. })
    ));
}

#[test]
fn unknown_field_is_reported_before_operator() {
    let registry = registry();
    let compiler = QueryCompiler::new(&registry);

    let err = compiler.filter("bogus:email:x").unwrap_err();
    assert_eq!(err, QueryFilterError::unknown_field("email", Clause::Filter));
    assert_eq!(err.to_string(), "query filter: field 'email' does not exist");

    assert_eq!(
        compiler.filter("bogus:id:1"),
        Err(QueryFilterError::UnknownOperator("bogus".to_string()))
    );
    assert_eq!(
        compiler.sort(Some("email:asc")),
        Err(QueryFilterError::unknown_field("email", Clause::Sort))
    );
}

#[test]
fn malformed_input_is_rejected() {
    let registry = registry();
    let compiler = QueryCompiler::new(&registry);

    assert_eq!(
        compiler.filter("eq:id"),
        Err(QueryFilterError::MalformedExpression("eq:id".to_string()))
    );
    assert!(matches!(
        compiler.filter("eq:id:1 & (eq:id:2"),
        Err(QueryFilterError::Syntax(SyntaxError::UnclosedBracket { .. }))
    ));
    assert!(matches!(
        compiler.sort(Some("id")),
        Err(QueryFilterError::MalformedSort(_))
    ));
    assert!(matches!(
        compiler.sort(Some("id:sideways")),
        Err(QueryFilterError::InvalidSortDirection(_))
    ));
}

#[test]
fn sort_falls_back_to_defaults() {
    let registry = registry();
    let compiler = QueryCompiler::new(&registry);

    for sort in [None, Some("")] {
        let order = compiler.sort(sort).unwrap();
        assert_eq!(order.len(), 1);
        assert_eq!(order[0].column, "p.id");
        assert_eq!(order[0].direction, SortDirection::Desc);
    }

    let order = compiler.sort(Some("name:ASC")).unwrap();
    assert_eq!(order[0].column, "p.name");
    assert_eq!(order[0].direction, SortDirection::Asc);
}

#[test]
fn empty_filter_applies_nothing() {
    let registry = registry();
    let compiled = QueryCompiler::new(&registry).compile(Some(""), None).unwrap();
    assert_eq!(compiled.predicate, None);

    let mut query = MemoryQuery::new(dataset());
    compiled.apply_to(&mut query);
    assert!(query.predicates().is_empty());
}

#[test]
fn paginates_filtered_results() {
    let registry = registry();
    let compiled = QueryCompiler::new(&registry)
        .compile(Some("eq:active:true"), None)
        .unwrap();

    let mut query = MemoryQuery::new(dataset());
    let page: Page<Record> = paginate(compiled, &mut query, PageRequest::new(2, 2)).unwrap();

    assert_eq!(page.pagination.total, 3);
    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.pagination.per_page, 2);
    assert_eq!(ids(&page.items), vec![1]);
}

#[test]
fn predicate_serializes_to_json() {
    let registry = registry();
    let predicate = QueryCompiler::new(&registry)
        .filter("eq:id:7 | is-null:name:")
        .unwrap()
        .unwrap();

    assert!(matches!(predicate, Predicate::Or(..)));
    assert_eq!(
        serde_json::to_value(&predicate).unwrap(),
        serde_json::json!({
            "or": [
                { "comparison": { "column": "p.id", "op": "eq", "value": "7" } },
                { "is_null": { "column": "p.name" } }
            ]
        })
    );
}
