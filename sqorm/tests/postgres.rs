//!
//! Round trips against a live Postgres.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -- --ignored`.
//!

use sqorm::prelude::*;
use sqorm::{downcast, Model, PgProvider, Value};

#[derive(Debug, Default, Model)]
#[table_name = "sqorm_people"]
pub struct Person {
    #[pk]
    id: i64,
    name: String,
    city: Option<String>,
}

async fn provider() -> PgProvider {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let provider = PgProvider::connect(&url).await.unwrap();

    for sql in [
        "DROP TABLE IF EXISTS sqorm_people",
        "CREATE TABLE sqorm_people (id BIGSERIAL PRIMARY KEY, name TEXT NOT NULL, city TEXT)",
    ] {
        sqlx::query(sql).execute(provider.engine().pool()).await.unwrap();
    }

    provider
}

fn person(name: &str, city: &str) -> Person {
    Person {
        id: 0,
        name: name.into(),
        city: Some(city.into()),
    }
}

#[tokio::test]
#[ignore]
async fn crud_round_trip() {
    let provider = provider().await;
    let store = <Person as Table>::store();

    let mut ann = person("ann", "NY");
    let mut bob = person("bob", "LA");
    let mut cy = Person {
        id: 100,
        ..person("cy", "SF")
    };
    provider
        .put(&mut [&mut ann, &mut bob, &mut cy])
        .await
        .unwrap();
    assert!(ann.id > 0);
    assert!(bob.id > ann.id);
    assert_eq!(cy.id, 100);

    let mut loaded = Person::default();
    provider.populate(&mut loaded, Value::I64(bob.id)).await.unwrap();
    assert_eq!(loaded.name, "bob");

    let cond = Cond::or(vec![Person::CITY.eq("NY"), Person::CITY.eq("LA")]);
    assert_eq!(provider.count(store, Some(&cond)).await.unwrap(), 2);

    provider
        .update(store, Some(&Person::ID.eq(ann.id)), &[Person::CITY.set("LA")])
        .await
        .unwrap();
    let found: Vec<Person> = downcast(
        provider
            .find(store, Some(&Person::CITY.eq("LA")), 0, 0)
            .await
            .unwrap(),
    )
    .unwrap();
    assert_eq!(found.len(), 2);

    let page = provider.find(store, None, 1, 1).await.unwrap();
    assert_eq!(page.len(), 1);

    provider.delete(store, Some(&Person::NAME.eq("cy"))).await.unwrap();
    assert_eq!(provider.count(store, None).await.unwrap(), 2);
}

#[tokio::test]
#[ignore]
async fn populate_missing_row_is_not_found() {
    let provider = provider().await;

    let mut nobody = Person::default();
    let err = provider
        .populate(&mut nobody, Value::I64(404))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}
