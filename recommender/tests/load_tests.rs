use recommender::{load_path, LoadError, Recommender, VectorizerConfig, Year};
use std::fs;
use tempfile::tempdir;

const CSV: &str = "movie_id,title,overview,genres,cast,director,year,popularity
1,Inception,a thief who steals secrets via dreams,Sci-Fi|Thriller,Leonardo DiCaprio,Christopher Nolan,2010,88.1
2,The Matrix,\"a hacker discovers reality is simulated\",Sci-Fi|Action,Keanu Reeves,Wachowskis,1999,
3,Titanic,a doomed ocean liner romance,Romance|Drama,,James Cameron,,70
";

#[test]
fn loads_csv_with_blank_cells_and_extra_columns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("movies.csv");
    fs::write(&path, CSV).unwrap();
    let corpus = load_path(&path).unwrap();
    assert_eq!(corpus.len(), 3);
    let titanic = &corpus.records()[2];
    assert_eq!(titanic.cast, "");
    assert_eq!(titanic.year, "");
    assert_eq!(titanic.year_value(), Year::Text(String::new()));
    assert_eq!(corpus.records()[0].year_value(), Year::Numeric(2010));
}

#[test]
fn loads_json_array_and_jsonl_from_a_directory() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("a.json"),
        r#"[{"movie_id": 1, "title": "Heat", "year": 1995}, {"movie_id": "2", "title": "Alien", "overview": null}]"#,
    )
    .unwrap();
    fs::write(dir.path().join("b.jsonl"), "{\"movie_id\": 3, \"title\": \"Up\"}\n\n{\"movie_id\": 4, \"title\": \"Her\"}\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let corpus = load_path(dir.path()).unwrap();
    let ids: Vec<i64> = corpus.records().iter().map(|m| m.movie_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(corpus.records()[0].year, "1995");
    assert_eq!(corpus.records()[1].overview, "");
}

#[test]
fn missing_file_is_a_load_error() {
    let dir = tempdir().unwrap();
    let err = load_path(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, LoadError::NotFound(_)));
    assert!(Recommender::from_path(dir.path().join("nope.csv"), VectorizerConfig::default()).is_err());
}

#[test]
fn missing_required_column_is_a_load_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("movies.csv");
    fs::write(&path, "movie_id,overview\n1,no title here\n").unwrap();
    assert!(matches!(load_path(&path), Err(LoadError::MissingField { row: 0, field: "title" })));
}

#[test]
fn unsupported_and_malformed_files() {
    let dir = tempdir().unwrap();
    let txt = dir.path().join("movies.txt");
    fs::write(&txt, "x").unwrap();
    assert!(matches!(load_path(&txt), Err(LoadError::UnsupportedFormat(_))));

    let bad = dir.path().join("movies.json");
    fs::write(&bad, "{not json").unwrap();
    assert!(matches!(load_path(&bad), Err(LoadError::Parse { .. })));

    let scalar = dir.path().join("scalar.json");
    fs::write(&scalar, "42").unwrap();
    assert!(matches!(load_path(&scalar), Err(LoadError::Parse { .. })));
}

#[test]
fn csv_cells_keep_their_exact_text() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("movies.csv");
    fs::write(
        &path,
        "movie_id,title,overview,cast,year\n1,007,3.10,+44,2010.0\n3,12345678901234567890,plain,,1999\n",
    )
    .unwrap();
    let corpus = load_path(&path).unwrap();
    let bond = &corpus.records()[0];
    assert_eq!(bond.title, "007");
    assert_eq!(bond.overview, "3.10");
    assert_eq!(bond.cast, "+44");
    assert_eq!(bond.year, "2010.0");
    assert_eq!(corpus.records()[1].title, "12345678901234567890");
    assert_eq!(corpus.records()[1].year_value(), Year::Numeric(1999));

    let rec = Recommender::new(corpus, VectorizerConfig::default()).unwrap();
    assert_eq!(rec.resolve_exact("007"), Some(0));
}
