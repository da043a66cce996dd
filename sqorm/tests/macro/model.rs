use sqorm::prelude::*;
use sqorm::Model;

#[derive(Default, Model)]
#[table_name = "publication"]
pub struct Publication {
    #[pk]
    id: uuid::Uuid,
    title: String,
    #[column = "edition_count"]
    editions: Option<i16>,
}

#[derive(Default, Model)]
#[table_name = "edition"]
struct Edition {
    #[pk]
    id: i32,
    publication_id: uuid::Uuid,
    r#type: Option<String>,
}

fn main() {
    let _ = Publication::EDITIONS.eq(3i16);
    let _ = Edition::TYPE.set("paperback");
    let _: &dyn Store = <Edition as Table>::store();
}
