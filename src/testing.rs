//! Shared fixtures for unit tests.

use crate::models::{Article, ArticleFile, Collection, Community, Fixture, ItemType, User};
use crate::services::Catalog;

pub(crate) fn article(
    id: &str,
    title: &str,
    abstract_text: &str,
    item_type_id: i64,
    collection_id: i64,
    submitter_id: &str,
    created_at: &str,
    views: u64,
) -> Article {
    Article {
        id: id.to_string(),
        title: title.to_string(),
        status: "published".to_string(),
        abstract_text: abstract_text.to_string(),
        item_type_id,
        collection_id,
        submitter_id: submitter_id.to_string(),
        embargo_until: None,
        created_at: created_at.to_string(),
        updated_at: created_at.to_string(),
        views,
        downloads: views / 10,
        pages: None,
        publisher: None,
        thumbnail: None,
        has_video: None,
    }
}

fn file(id: &str, item_id: &str, mime_type: &str, file_path: &str) -> ArticleFile {
    ArticleFile {
        id: id.to_string(),
        item_id: item_id.to_string(),
        file_path: file_path.to_string(),
        mime_type: mime_type.to_string(),
        file_name: None,
        size: None,
    }
}

fn user(id: &str, full_name: &str) -> User {
    User {
        id: id.to_string(),
        full_name: full_name.to_string(),
        email: None,
        role: None,
    }
}

/// Six articles across three item types, two communities and one
/// collection whose community is missing. `a5`'s submitter does not exist.
pub(crate) fn fixture() -> Fixture {
    let mut a1 = article(
        "a1",
        "Neural Networks for Crop Yield",
        "We apply deep learning to predict harvests.",
        1,
        10,
        "u1",
        "2023-04-10T08:00:00Z",
        120,
    );
    a1.pages = Some(84);
    a1.publisher = Some("University Press".to_string());

    let mut a5 = article(
        "a5",
        "Orphaned Manuscript",
        "Submitted by a removed account.",
        2,
        30,
        "u404",
        "2022-08-08T12:00:00Z",
        10,
    );
    a5.thumbnail = Some("/thumbs/a5.jpg".to_string());

    let mut a6 = article(
        "a6",
        "Weather Data Pipelines",
        "Streaming sensor data into forecasting models.",
        2,
        10,
        "u1",
        "2023-01-05T09:00:00Z",
        500,
    );
    a6.has_video = Some(true);

    Fixture {
        items: vec![
            a1,
            article(
                "a2",
                "Soil Chemistry Survey",
                "A neural approach to soil analysis is compared with classic methods.",
                2,
                10,
                "u2",
                "2022-01-15T10:00:00Z",
                300,
            ),
            article(
                "a3",
                "Medieval Trade Routes",
                "Archival study of merchant guilds.",
                3,
                20,
                "u3",
                "2021-06-01T10:00:00Z",
                50,
            ),
            article(
                "a4",
                "Applied Neural Methods",
                "Survey of neural architectures.",
                1,
                10,
                "u2",
                "2019-11-20T10:00:00Z",
                80,
            ),
            a5,
            a6,
        ],
        users: vec![
            user("u1", "Amina Yusuf"),
            user("u2", "Brian Okafor"),
            user("u3", "Carla Mendes"),
        ],
        files: vec![
            file("f1", "a1", "application/pdf", "/files/a1.pdf"),
            file("f2", "a1", "image/png", "/files/a1.png"),
            file("f3", "a2", "application/msword", "/files/a2.doc"),
            file("f4", "a6", "video/mp4", "/files/a6.mp4"),
            file("f5", "a3", "application/pdf", "/files/a3.pdf"),
        ],
        item_types: vec![
            ItemType { id: 1, name: "Thesis".to_string() },
            ItemType { id: 2, name: "Journal".to_string() },
            ItemType { id: 3, name: "Paper".to_string() },
        ],
        collections: vec![
            Collection { id: 10, name: "Computer Science".to_string(), community_id: 100 },
            Collection { id: 20, name: "History".to_string(), community_id: 200 },
            Collection { id: 30, name: "Unsorted".to_string(), community_id: 999 },
        ],
        communities: vec![
            Community { id: 100, name: "Faculty of Science".to_string() },
            Community { id: 200, name: "Faculty of Arts".to_string() },
        ],
    }
}

pub(crate) fn catalog() -> Catalog {
    Catalog::new(fixture())
}

/// `count` articles that all mention "quantum", one day apart, newest last.
pub(crate) fn bulk_catalog(count: usize) -> Catalog {
    let mut fixture = fixture();
    fixture.items = (0..count)
        .map(|i| {
            article(
                &format!("q{i:02}"),
                &format!("Quantum Study {i:02}"),
                "Notes on quantum effects.",
                3,
                20,
                "u3",
                &format!("2020-01-{:02}T00:00:00Z", i + 1),
                i as u64,
            )
        })
        .collect();
    Catalog::new(fixture)
}
