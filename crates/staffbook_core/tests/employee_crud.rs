use rusqlite::Connection;
use staffbook_core::db::open_db_in_memory;
use staffbook_core::{
    load_file, Employee, EmployeeRepository, LoadError, RepoError, SqliteEmployeeRepository,
};
use std::collections::BTreeSet;

fn employee(name: &str, age: i64) -> Employee {
    Employee {
        name: name.to_string(),
        age,
        gender: "female".to_string(),
        nationality: "PT".to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        department: "Ops".to_string(),
        reason: "vacation".to_string(),
        start_date: "2024-01-02".to_string(),
        days_off: 3,
    }
}

fn names_in_table(conn: &Connection) -> BTreeSet<String> {
    let mut stmt = conn.prepare("SELECT name FROM employees;").unwrap();
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .unwrap()
        .collect::<Result<BTreeSet<_>, _>>()
        .unwrap();
    names
}

#[test]
fn add_and_find_roundtrip() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&mut conn);

    let ana = employee("Ana", 30);
    repo.add(&ana).unwrap();

    let loaded = repo.find_by_name("Ana").unwrap();
    assert_eq!(loaded, ana);
}

#[test]
fn find_missing_name_is_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&mut conn);

    let err = repo.find_by_name("Nobody").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(ref name) if name == "Nobody"));
    assert_eq!(err.to_string(), "employee not found: Nobody");
}

#[test]
fn add_duplicate_name_is_storage_failure() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&mut conn);

    repo.add(&employee("Ana", 30)).unwrap();
    let err = repo.add(&employee("Ana", 40)).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert!(!err.is_not_found());
}

#[test]
fn update_overwrites_all_fields() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&mut conn);

    repo.add(&employee("Ana", 30)).unwrap();
    let replacement = Employee {
        age: 31,
        ..Employee::named("Ana")
    };
    repo.update_by_name(&replacement).unwrap();

    let loaded = repo.find_by_name("Ana").unwrap();
    assert_eq!(loaded, replacement);
    assert_eq!(loaded.email, "");
}

#[test]
fn update_missing_name_is_not_found_and_leaves_table_unchanged() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let repo = SqliteEmployeeRepository::new(&mut conn);
        repo.add(&employee("Ana", 30)).unwrap();

        let err = repo.update_by_name(&employee("Ghost", 50)).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(repo.find_by_name("Ana").unwrap(), employee("Ana", 30));
    }

    assert_eq!(names_in_table(&conn), BTreeSet::from(["Ana".to_string()]));
}

#[test]
fn delete_removes_exactly_one_row() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let repo = SqliteEmployeeRepository::new(&mut conn);
        repo.add(&employee("Ana", 30)).unwrap();
        repo.add(&employee("Bo", 41)).unwrap();

        repo.delete_by_name("Ana").unwrap();
        assert!(repo.find_by_name("Ana").unwrap_err().is_not_found());
        assert!(repo.delete_by_name("Ana").unwrap_err().is_not_found());
    }

    assert_eq!(names_in_table(&conn), BTreeSet::from(["Bo".to_string()]));
}

#[test]
fn load_all_replaces_previous_contents() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut repo = SqliteEmployeeRepository::new(&mut conn);
        repo.add(&employee("Old", 60)).unwrap();

        repo.load_all(&[employee("Ana", 30), employee("Bo", 41)]).unwrap();
        assert_eq!(repo.find_by_name("Bo").unwrap().age, 41);
        assert!(repo.find_by_name("Old").unwrap_err().is_not_found());
    }

    assert_eq!(
        names_in_table(&conn),
        BTreeSet::from(["Ana".to_string(), "Bo".to_string()])
    );
}

#[test]
fn load_all_with_empty_input_clears_table() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut repo = SqliteEmployeeRepository::new(&mut conn);
        repo.add(&employee("Old", 60)).unwrap();
        repo.load_all(&[]).unwrap();
    }

    assert!(names_in_table(&conn).is_empty());
}

#[test]
fn failed_load_rolls_back_and_keeps_previous_contents() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut repo = SqliteEmployeeRepository::new(&mut conn);
        repo.add(&employee("Old", 60)).unwrap();

        let err = repo
            .load_all(&[employee("Ana", 30), employee("Ana", 31)])
            .unwrap_err();
        assert!(matches!(err, RepoError::Db(_)));
    }

    assert_eq!(names_in_table(&conn), BTreeSet::from(["Old".to_string()]));
}

#[test]
fn load_file_reads_json_and_replaces_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employees.json");
    std::fs::write(
        &path,
        r#"[
            {"name":"Ana","age":30,"gender":"female","nationality":"PT",
             "email":"ana@example.com","department":"Ops","reason":"vacation",
             "startDate":"2024-01-02","daysOff":3},
            {"name":"Bo","age":41}
        ]"#,
    )
    .unwrap();

    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteEmployeeRepository::new(&mut conn);
    repo.add(&employee("Old", 60)).unwrap();

    let count = load_file(&mut repo, &path).unwrap();
    assert_eq!(count, 2);
    assert_eq!(repo.find_by_name("Ana").unwrap(), employee("Ana", 30));
    assert_eq!(
        repo.find_by_name("Bo").unwrap(),
        Employee {
            age: 41,
            ..Employee::named("Bo")
        }
    );
    assert!(repo.find_by_name("Old").unwrap_err().is_not_found());
}

#[test]
fn load_file_with_bad_json_leaves_storage_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "[{\"name\":").unwrap();

    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteEmployeeRepository::new(&mut conn);
    repo.add(&employee("Old", 60)).unwrap();

    let err = load_file(&mut repo, &path).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
    assert_eq!(repo.find_by_name("Old").unwrap().age, 60);
}
