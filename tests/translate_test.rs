use mongo2sql::error::QueryError;
use mongo2sql::parser::split_groups;
use mongo2sql::translate;
use pretty_assertions::assert_eq;

#[test]
fn test_find_all() {
    assert_eq!(translate("db.user.find();").unwrap(), "SELECT * FROM user;");
}

#[test]
fn test_filter_only() {
    assert_eq!(
        translate("db.user.find({name :'julio'});").unwrap(),
        "SELECT * FROM user WHERE name = 'julio';"
    );
}

#[test]
fn test_filter_and_projection() {
    assert_eq!(
        translate("db.user.find({_id :23113} ,{name :1 ,age :1});").unwrap(),
        "SELECT name, age FROM user WHERE _id = 23113;"
    );
    assert_eq!(
        translate("db.user.find({_id:23113},{name:1,age:1});").unwrap(),
        "SELECT name, age FROM user WHERE _id = 23113;"
    );
}

#[test]
fn test_comparison_with_projection() {
    assert_eq!(
        translate("db.user.find({age :{$gte :21}} ,{name :1 ,_id :1});").unwrap(),
        "SELECT name, _id FROM user WHERE age >= 21;"
    );
}

#[test]
fn test_nested_document() {
    assert_eq!(
        translate("db.user.find({name:{ first: 'Alexa', last: 'Griffith'}});").unwrap(),
        "SELECT * FROM user WHERE name.first = 'Alexa' AND name.last = 'Griffith';"
    );
}

#[test]
fn test_in_operator() {
    assert_eq!(
        translate("db.raffle.find({ticket_no :{$in :[725, 542, 390]}})").unwrap(),
        "SELECT * FROM raffle WHERE ticket_no IN [725, 542, 390];"
    );
}

#[test]
fn test_or_operator() {
    assert_eq!(
        translate("db.raffle.find({$or :[{ticket_no : 725}, {winner: true}]})").unwrap(),
        "SELECT * FROM raffle WHERE ticket_no = 725 OR winner = TRUE;"
    );
}

#[test]
fn test_or_with_in() {
    assert_eq!(
        translate("db.raffle.find({$or :[{ticket_no :{$in :[725, 542, 390]}}, {winner: true}]})")
            .unwrap(),
        "SELECT * FROM raffle WHERE ticket_no IN [725, 542, 390] OR winner = TRUE;"
    );
}

#[test]
fn test_range_on_one_field() {
    assert_eq!(
        translate("db.users.find({age : {$lt : 30, $gt : 20}})").unwrap(),
        "SELECT * FROM users WHERE age < 30 AND age > 20;"
    );
}

#[test]
fn test_and_operator() {
    assert_eq!(
        translate("db.users.find({$and : [{x : {$lt : 1}}, {x : 4}]})").unwrap(),
        "SELECT * FROM users WHERE x < 1 AND x = 4;"
    );
}

#[test]
fn test_ne_and_lte() {
    assert_eq!(
        translate("db.users.find({status: {$ne: 'A'}, age: {$lte: 50}})").unwrap(),
        "SELECT * FROM users WHERE status != 'A' AND age <= 50;"
    );
}

#[test]
fn test_projection_only() {
    assert_eq!(
        translate("db.user.find({name: 1, age: 1, _id: 0})").unwrap(),
        "SELECT name, age, _id FROM user;"
    );
}

#[test]
fn test_table_name_not_found() {
    let err = translate("db.faketable.somethingelse()").unwrap_err();
    assert!(matches!(err, QueryError::TableNameNotFound));
}

#[test]
fn test_unsupported_operator() {
    let err = translate("db.user.find({name: {$regex: '^A'}})").unwrap_err();
    assert!(matches!(err, QueryError::UnsupportedOperator(_)));
}

#[test]
fn test_too_many_argument_groups() {
    let err = translate("db.t.find({a:1},{b:1},{c:1});").unwrap_err();
    assert!(matches!(err, QueryError::TooManyArgumentGroups(3)));
}

#[test]
fn test_chained_limit_is_ignored() {
    assert_eq!(
        translate("db.t.find({a:1}).limit(5)").unwrap(),
        "SELECT * FROM t WHERE a = 1;"
    );
}

#[test]
fn test_split_groups() {
    assert_eq!(
        split_groups("{_id: 23113}, {name: 1, age: 1}"),
        vec!["{_id: 23113}", "{name: 1, age: 1}"]
    );
    assert!(split_groups("").is_empty());
}
