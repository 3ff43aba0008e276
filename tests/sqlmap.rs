use atlas::{
    params, values, Connection, FromRow, MappedStatement, SqlMap, StatementKind, Value,
};

#[derive(Debug, FromRow, PartialEq)]
struct User {
    id: i64,
    name: String,
    #[column(name = "email_address")]
    email: Option<String>,
    active: bool,
}

async fn setup() -> atlas::Result<(Connection, SqlMap)> {
    let _ = env_logger::builder().is_test(true).try_init();

    let connection = Connection::create_from_dsn("sqlite://:memory:", None)?
        .connect()
        .await?;
    connection
        .execute(
            "CREATE TABLE user (id INTEGER, name VARCHAR(64), email_address VARCHAR(128), active BOOLEAN)",
            params![],
        )
        .await?;

    let map = SqlMap::new();
    map.add_statement(MappedStatement::new(
        "insert_user",
        StatementKind::Insert,
        "insert into user (id, name, email_address, active) \
         values (#{id}, #{name}, #{email, type=string}, #{active})",
    )?)?;
    map.add_statement(MappedStatement::new(
        "get_user_by_id",
        StatementKind::Select,
        "select * from user where id = #{id}",
    )?)?;

    Ok((connection, map))
}

#[tokio::test]
async fn users_round_trip_through_the_mapper() -> atlas::Result<()> {
    let (connection, map) = setup().await?;

    let affected = map
        .execute(
            &connection,
            "insert_user",
            values! {
                "id" => 1,
                "name" => "alice",
                "email" => "alice@example.org",
                "active" => true,
            },
        )
        .await?;
    assert_eq!(affected, 1);

    let user: Option<User> = map
        .fetch_one(&connection, "get_user_by_id", values! { "id" => 1 })
        .await?;
    assert_eq!(
        user,
        Some(User {
            id: 1,
            name: "alice".to_string(),
            email: Some("alice@example.org".to_string()),
            active: true,
        })
    );

    Ok(())
}

#[tokio::test]
async fn null_columns_map_to_none_fields() -> atlas::Result<()> {
    let (connection, map) = setup().await?;

    map.execute(
        &connection,
        "insert_user",
        values! {
            "id" => 2,
            "name" => "bob",
            "email" => Value::NULL,
            "active" => false,
        },
    )
    .await?;

    let user: User = map
        .fetch_one(&connection, "get_user_by_id", values! { "id" => 2 })
        .await?
        .expect("bob was inserted");
    assert_eq!(user.email, None);
    assert!(!user.active);

    Ok(())
}

#[tokio::test]
async fn typed_entries_convert_before_binding() -> atlas::Result<()> {
    let (connection, map) = setup().await?;

    map.execute(
        &connection,
        "insert_user",
        values! {
            "id" => 3,
            "name" => "simple_array"; vec!["reader", "writer"],
            "email" => Value::NULL,
            "active" => true,
        },
    )
    .await?;

    let user: User = map
        .fetch_one(&connection, "get_user_by_id", values! { "id" => 3 })
        .await?
        .expect("the user was inserted");
    assert_eq!(user.name, "reader,writer");

    Ok(())
}

#[tokio::test]
async fn fetch_maps_every_row() -> atlas::Result<()> {
    let (connection, map) = setup().await?;
    map.add_statement(MappedStatement::new(
        "all_users",
        StatementKind::Select,
        "select * from user order by id",
    )?)?;

    for (id, name) in [(1, "alice"), (2, "bob"), (3, "carol")] {
        map.execute(
            &connection,
            "insert_user",
            values! {
                "id" => id,
                "name" => name,
                "email" => Value::NULL,
                "active" => true,
            },
        )
        .await?;
    }

    let users: Vec<User> = map.fetch(&connection, "all_users", values! {}).await?;
    assert_eq!(users.len(), 3);
    assert_eq!(users[0].name, "alice");
    assert_eq!(users[2].id, 3);

    Ok(())
}
