//! Integration tests for the management client using wiremock
//!
//! These tests drive the client against mocked endpoints, covering the
//! space lifecycle, child resources, status-code mapping and pagination.

use cma::api::http::CONTENT_TYPE_MANAGEMENT;
use cma::resource::{Effect, Policy};
use cma::{
    AccessToken, AnyResource, ApiKey, Asset, AssetFile, Client, ClientConfig, ContentType, Entry,
    Error, Field, Link, Locale, Query, Role, Space, SpaceMembership, Webhook,
};
use futures::TryStreamExt;
use serde_json::{json, Value};
use wiremock::matchers::{bearer_token, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let config = ClientConfig::new(AccessToken::new(TOKEN).unwrap())
        .with_host(server.address().to_string())
        .with_insecure(true);
    let client = Client::new(config).expect("client should build");
    (server, client)
}

fn space_link(id: &str) -> Value {
    json!({"sys": {"type": "Link", "linkType": "Space", "id": id}})
}

fn space_json(id: &str, name: &str, version: u64) -> Value {
    json!({
        "sys": {
            "type": "Space",
            "id": id,
            "version": version,
            "createdAt": "2024-01-15T10:30:00.000Z",
            "updatedAt": "2024-01-15T10:30:00.000Z"
        },
        "name": name
    })
}

fn locale_json(id: &str, name: &str, code: &str) -> Value {
    json!({
        "sys": {"type": "Locale", "id": id, "version": 1, "space": space_link("s1")},
        "name": name,
        "code": code,
        "default": code == "en-US",
        "contentManagementApi": true,
        "contentDeliveryApi": true
    })
}

fn entry_json(id: &str, version: u64, published: Option<u64>) -> Value {
    let mut sys = json!({
        "type": "Entry",
        "id": id,
        "version": version,
        "space": space_link("s1"),
        "contentType": {"sys": {"type": "Link", "linkType": "ContentType", "id": "post"}}
    });
    if let Some(p) = published {
        sys["publishedVersion"] = json!(p);
    }
    json!({"sys": sys, "fields": {"title": {"en-US": "Hello"}}})
}

fn array(items: Vec<Value>, total: u64, skip: u64, limit: u64) -> Value {
    json!({"sys": {"type": "Array"}, "total": total, "skip": skip, "limit": limit, "items": items})
}

fn error_body(id: &str, message: &str) -> Value {
    json!({
        "sys": {"type": "Error", "id": id},
        "message": message,
        "requestId": "req-1"
    })
}

async fn mount_space(server: &MockServer, id: &str, version: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/spaces/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(space_json(id, "Space", version)))
        .mount(server)
        .await;
}

/// Client-level operations
mod client_tests {
    use super::*;

    #[tokio::test]
    async fn test_gets_spaces() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/spaces"))
            .and(bearer_token(TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(array(
                vec![space_json("s1", "First", 1), space_json("s2", "Second", 4)],
                2,
                0,
                25,
            )))
            .mount(&server)
            .await;

        let spaces = client.get_spaces(&Query::new()).await.unwrap();

        assert!(!spaces.is_empty());
        assert_eq!(spaces.total, spaces.items.len() as u64);
        assert_eq!(spaces.items[1].name, "Second");
        assert_eq!(spaces.items[1].path(), "/spaces/s2");
        assert!(!spaces.has_next_page());
    }

    #[tokio::test]
    async fn test_gets_organizations() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/organizations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(array(
                vec![json!({"sys": {"type": "Organization", "id": "org-1"}, "name": "Acme"})],
                1,
                0,
                25,
            )))
            .mount(&server)
            .await;

        let orgs = client.get_organizations().await.unwrap();
        assert!(orgs.items.len() >= 1);
        assert_eq!(orgs.items[0].name, "Acme");
        assert_eq!(orgs.items[0].version(), None);
    }

    #[tokio::test]
    async fn test_gets_space() {
        let (server, client) = setup().await;
        mount_space(&server, "cfexampleapi", 3).await;

        let space = client.get_space("cfexampleapi").await.unwrap();
        assert_eq!(space.sys().id, "cfexampleapi");
        assert!(!space.name.is_empty());
        assert_eq!(space.version(), Some(3));
        assert!(space.sys().created_at.is_some());
    }

    #[tokio::test]
    async fn test_fails_to_get_space() {
        let (server, client) = setup().await;

        let id = cma::random_id("weirdrandomid");
        Mock::given(method("GET"))
            .and(path(format!("/spaces/{}", id)))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(error_body("NotFound", "The resource could not be found.")),
            )
            .mount(&server)
            .await;

        let err = client.get_space(&id).await.unwrap_err();
        assert!(err.is_not_found());
        let details = err.details().unwrap();
        assert_eq!(details.status, Some(404));
        assert_eq!(details.error_id.as_deref(), Some("NotFound"));
        assert_eq!(details.request_id.as_deref(), Some("req-1"));
    }

    #[tokio::test]
    async fn test_creates_updates_and_deletes_a_space() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/spaces"))
            .and(header("X-Contentful-Organization", "org-1"))
            .and(header("content-type", CONTENT_TYPE_MANAGEMENT))
            .and(body_json(json!({"name": "spacename"})))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(space_json("new-space", "spacename", 1)),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/spaces/new-space"))
            .and(header("X-Contentful-Version", "1"))
            .and(body_json(json!({"name": "updatedspacename"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(space_json("new-space", "updatedspacename", 2)),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/spaces/new-space"))
            .and(header("X-Contentful-Version", "2"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/spaces/new-space"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(error_body("NotFound", "gone")),
            )
            .mount(&server)
            .await;

        let mut space = client
            .create_space(Space::new("spacename"), Some("org-1"))
            .await
            .unwrap();
        assert_eq!(space.name, "spacename");

        space.name = "updatedspacename".to_string();
        let mut updated = space.update().await.unwrap();
        assert_eq!(updated.name, "updatedspacename");
        assert!(updated.version() > space.version());

        updated.delete().await.unwrap();
        assert!(updated.is_deleted());

        let err = client.get_space("new-space").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        // Second delete never reaches the server (DELETE expects exactly 1 call)
        let err = updated.delete().await.unwrap_err();
        assert!(err.is_not_found());
        assert!(updated.update().await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_create_space_without_name_fails_locally() {
        let (server, client) = setup().await;

        let err = client.create_space(Space::new(""), None).await.unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
        assert_eq!(err.status(), None);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_server_validation_error() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/spaces"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "sys": {"type": "Error", "id": "ValidationFailed"},
                "message": "Validation error",
                "details": {"errors": [{"name": "taken", "path": "name"}]}
            })))
            .mount(&server)
            .await;

        let err = client
            .create_space(Space::new("duplicate"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
        assert_eq!(err.status(), Some(422));
        assert!(err.details().unwrap().details.is_some());
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/spaces"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(error_body("AccessTokenInvalid", "The access token is invalid")),
            )
            .mount(&server)
            .await;

        let err = client.get_spaces(&Query::new()).await.unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
        assert_eq!(
            cma::format_error(&err),
            "Authentication failed. Check your access token."
        );
    }

    #[tokio::test]
    async fn test_rate_limit_reset_header() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/spaces"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("X-Contentful-RateLimit-Reset", "3")
                    .set_body_json(error_body("RateLimitExceeded", "slow down")),
            )
            .mount(&server)
            .await;

        let err = client.get_spaces(&Query::new()).await.unwrap_err();
        assert!(matches!(err, Error::RateLimited { reset: Some(3), .. }));
    }

    #[tokio::test]
    async fn test_malformed_responses() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/spaces/no-sys"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "x"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/spaces/no-version"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sys": {"type": "Space", "id": "no-version"},
                "name": "x"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/spaces/wrong-kind"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(entry_json("wrong-kind", 1, None)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/spaces/not-json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        for id in ["no-sys", "no-version", "wrong-kind", "not-json"] {
            let err = client.get_space(id).await.unwrap_err();
            assert!(matches!(err, Error::MalformedResponse(_)), "{id}: {err:?}");
        }
    }

    #[tokio::test]
    async fn test_pagination_walks_all_pages() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/spaces"))
            .and(query_param("skip", "0"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(array(
                vec![space_json("s1", "One", 1), space_json("s2", "Two", 1)],
                3,
                0,
                2,
            )))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/spaces"))
            .and(query_param("skip", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(array(
                vec![space_json("s3", "Three", 1)],
                3,
                2,
                2,
            )))
            .expect(1)
            .mount(&server)
            .await;

        let spaces = client
            .collect_all::<Space>("/spaces", Query::new().skip(0).limit(2))
            .await
            .unwrap();
        let ids: Vec<&str> = spaces.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["s1", "s2", "s3"]);
    }

    #[tokio::test]
    async fn test_pagination_stream_stops_on_error() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/spaces"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let result: Result<Vec<_>, Error> = client
            .paginate::<Space>("/spaces", Query::new())
            .try_collect()
            .await;
        assert!(matches!(result, Err(Error::Api(_))));
    }

    #[tokio::test]
    async fn test_get_space_rejects_other_id() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/spaces/s1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(space_json("s2", "Other", 1)))
            .mount(&server)
            .await;

        let err = client.get_space("s1").await.unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_pagination_ignores_echoed_skip() {
        let (server, client) = setup().await;

        // Every page claims skip 0; the walk still ends after total items
        Mock::given(method("GET"))
            .and(path("/spaces"))
            .respond_with(ResponseTemplate::new(200).set_body_json(array(
                vec![space_json("s1", "One", 1), space_json("s2", "Two", 1)],
                5,
                0,
                2,
            )))
            .expect(3)
            .mount(&server)
            .await;

        let spaces = client
            .collect_all::<Space>("/spaces", Query::new().limit(2))
            .await
            .unwrap();
        assert_eq!(spaces.len(), 6);
    }

    #[tokio::test]
    async fn test_wrap_dispatches_on_sys_type() {
        let (_server, client) = setup().await;

        let entry = client.wrap(entry_json("e1", 2, None)).unwrap();
        assert_eq!(entry.kind(), "Entry");
        match entry {
            AnyResource::Entry(e) => {
                assert_eq!(e.path(), "/spaces/s1/entries/e1");
                assert_eq!(e.content_type_id(), Some("post"));
            }
            other => panic!("unexpected {:?}", other),
        }

        let space = client.wrap(space_json("s9", "Nine", 1)).unwrap();
        assert!(matches!(space, AnyResource::Space(_)));

        let err = client
            .wrap(json!({"sys": {"type": "Snapshot", "id": "x", "version": 1}}))
            .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));

        // Space-scoped kinds need sys.space to know their path
        let err = client
            .wrap(json!({"sys": {"type": "Role", "id": "r", "version": 1}, "name": "Editor"}))
            .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }
}

/// Child resources created and managed through a space handle
mod space_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_locale_then_list_includes_it() {
        let (server, client) = setup().await;
        mount_space(&server, "s1", 1).await;

        Mock::given(method("POST"))
            .and(path("/spaces/s1/locales"))
            .and(body_json(json!({"name": "German (Germany)", "code": "de-DE"})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(locale_json("loc-de", "German (Germany)", "de-DE")),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/spaces/s1/locales"))
            .respond_with(ResponseTemplate::new(200).set_body_json(array(
                vec![
                    locale_json("loc-en", "English", "en-US"),
                    locale_json("loc-de", "German (Germany)", "de-DE"),
                ],
                2,
                0,
                100,
            )))
            .mount(&server)
            .await;

        let space = client.get_space("s1").await.unwrap();
        let locale = space
            .create_locale(Locale::new("German (Germany)", "de-DE"))
            .await
            .unwrap();
        assert_eq!(locale.code, "de-DE");
        assert_eq!(locale.path(), "/spaces/s1/locales/loc-de");

        let locales = space.get_locales().await.unwrap();
        assert!(locales.items.iter().any(|l| l.code == "de-DE"));
        assert!(locales.items.iter().any(|l| l.is_default()));
    }

    #[tokio::test]
    async fn test_children_of_deleted_space_are_unreachable() {
        let (server, client) = setup().await;
        mount_space(&server, "s1", 1).await;

        Mock::given(method("DELETE"))
            .and(path("/spaces/s1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let mut space = client.get_space("s1").await.unwrap();
        space.delete().await.unwrap();

        let err = space
            .create_locale(Locale::new("German (Germany)", "de-DE"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_version_mismatch_leaves_handle_unchanged() {
        let (server, client) = setup().await;
        mount_space(&server, "s1", 3).await;

        Mock::given(method("PUT"))
            .and(path("/spaces/s1"))
            .and(header("X-Contentful-Version", "3"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(error_body("VersionMismatch", "Version mismatch")),
            )
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/spaces/s1"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(error_body("VersionMismatch", "Version mismatch")),
            )
            .mount(&server)
            .await;

        let mut space = client.get_space("s1").await.unwrap();
        space.name = "renamed".to_string();

        let err = space.update().await.unwrap_err();
        assert!(err.is_version_mismatch());
        assert_eq!(space.version(), Some(3));
        assert_eq!(space.name, "renamed");

        let err = space.delete().await.unwrap_err();
        assert!(err.is_version_mismatch());
        assert!(!space.is_deleted());
    }

    #[tokio::test]
    async fn test_entry_lifecycle() {
        let (server, client) = setup().await;
        mount_space(&server, "s1", 1).await;

        Mock::given(method("POST"))
            .and(path("/spaces/s1/entries"))
            .and(header("X-Contentful-Content-Type", "post"))
            .and(body_json(json!({"fields": {"title": {"en-US": "Hello"}}})))
            .respond_with(ResponseTemplate::new(201).set_body_json(entry_json("e1", 1, None)))
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/spaces/s1/entries/e1/published"))
            .and(header("X-Contentful-Version", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(entry_json("e1", 2, Some(1))))
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/spaces/s1/entries/e1/published"))
            .and(header("X-Contentful-Version", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(entry_json("e1", 3, None)))
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/spaces/s1/entries/e1/archived"))
            .and(header("X-Contentful-Version", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json({
                let mut archived = entry_json("e1", 4, None);
                archived["sys"]["archivedVersion"] = json!(3);
                archived
            }))
            .mount(&server)
            .await;

        let space = client.get_space("s1").await.unwrap();
        let entry = space
            .create_entry("post", Entry::new().with_field("title", "en-US", "Hello"))
            .await
            .unwrap();
        assert!(entry.is_draft());
        assert_eq!(entry.field("title", "en-US"), Some(&json!("Hello")));

        let published = entry.publish().await.unwrap();
        assert!(published.is_published());
        assert_eq!(published.version(), Some(2));

        let unpublished = published.unpublish().await.unwrap();
        assert!(unpublished.is_draft());

        let archived = unpublished.archive().await.unwrap();
        assert!(archived.is_archived());
    }

    #[tokio::test]
    async fn test_create_with_id_validates_id() {
        let (server, client) = setup().await;
        mount_space(&server, "s1", 1).await;

        let space = client.get_space("s1").await.unwrap();
        let err = space
            .create_entry_with_id("post", "not a valid id", Entry::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
        // Only the GET for the space reached the server
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_content_type_create_with_id_and_publish() {
        let (server, client) = setup().await;
        mount_space(&server, "s1", 1).await;

        let ct_response = |version: u64, published: Option<u64>| {
            let mut sys = json!({"type": "ContentType", "id": "post", "version": version});
            if let Some(p) = published {
                sys["publishedVersion"] = json!(p);
            }
            json!({
                "sys": sys,
                "name": "Post",
                "displayField": "title",
                "fields": [{"id": "title", "name": "Title", "type": "Symbol", "required": true}]
            })
        };

        Mock::given(method("PUT"))
            .and(path("/spaces/s1/content_types/post"))
            .respond_with(ResponseTemplate::new(201).set_body_json(ct_response(1, None)))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/spaces/s1/content_types/post/published"))
            .and(header("X-Contentful-Version", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ct_response(2, Some(1))))
            .mount(&server)
            .await;

        let space = client.get_space("s1").await.unwrap();
        let ct = space
            .create_content_type_with_id(
                "post",
                ContentType::new("Post")
                    .with_field(Field::new("title", "Title", "Symbol").required())
                    .with_display_field("title"),
            )
            .await
            .unwrap();
        assert_eq!(ct.field("title").unwrap().field_type, "Symbol");

        let published = ct.publish().await.unwrap();
        assert!(published.is_published());
        assert!(!published.is_updated());
    }

    #[tokio::test]
    async fn test_asset_processing() {
        let (server, client) = setup().await;
        mount_space(&server, "s1", 1).await;

        Mock::given(method("POST"))
            .and(path("/spaces/s1/assets"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "sys": {"type": "Asset", "id": "a1", "version": 1},
                "fields": {
                    "title": {"en-US": "Logo"},
                    "file": {"en-US": {
                        "fileName": "logo.png",
                        "contentType": "image/png",
                        "upload": "https://example.com/logo.png"
                    }}
                }
            })))
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/spaces/s1/assets/a1/files/en-US/process"))
            .and(header("X-Contentful-Version", "1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let space = client.get_space("s1").await.unwrap();
        let asset = space
            .create_asset(Asset::new().with_title("en-US", "Logo").with_file(
                "en-US",
                AssetFile::from_upload("logo.png", "image/png", "https://example.com/logo.png"),
            ))
            .await
            .unwrap();
        assert_eq!(asset.title("en-US"), Some("Logo"));

        asset.process_for_all_locales().await.unwrap();
    }

    #[tokio::test]
    async fn test_entries_with_linked_includes() {
        let (server, client) = setup().await;
        mount_space(&server, "s1", 1).await;

        let mut post = entry_json("post-1", 1, None);
        post["fields"]["author"] =
            json!({"en-US": {"sys": {"type": "Link", "linkType": "Entry", "id": "author-1"}}});

        let mut page = array(vec![post], 1, 0, 100);
        page["includes"] = json!({
            "Entry": [{"sys": {"type": "Entry", "id": "author-1"}, "fields": {"name": {"en-US": "Ada"}}}]
        });

        Mock::given(method("GET"))
            .and(path("/spaces/s1/entries"))
            .and(query_param("content_type", "post"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page))
            .mount(&server)
            .await;

        let space = client.get_space("s1").await.unwrap();
        let entries = space
            .get_entries(&Query::new().param("content_type", "post"))
            .await
            .unwrap();

        let link: Link = entries.items[0].link("author", "en-US").unwrap();
        let author = entries.resolve_link(&link).unwrap();
        assert_eq!(author["fields"]["name"]["en-US"], "Ada");
    }

    #[tokio::test]
    async fn test_webhook_update_and_delete() {
        let (server, client) = setup().await;
        mount_space(&server, "s1", 1).await;

        let hook = |version: u64, name: &str| {
            json!({
                "sys": {"type": "WebhookDefinition", "id": "wh1", "version": version},
                "name": name,
                "url": "https://example.com/hook",
                "topics": ["Entry.publish"],
                "headers": []
            })
        };

        Mock::given(method("POST"))
            .and(path("/spaces/s1/webhook_definitions"))
            .respond_with(ResponseTemplate::new(201).set_body_json(hook(1, "Publish hook")))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/spaces/s1/webhook_definitions/wh1"))
            .and(header("X-Contentful-Version", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(hook(2, "Renamed hook")))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/spaces/s1/webhook_definitions/wh1"))
            .and(header("X-Contentful-Version", "2"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let space = client.get_space("s1").await.unwrap();
        let mut webhook = space
            .create_webhook(Webhook::new(
                "Publish hook",
                "https://example.com/hook",
                &["Entry.publish"],
            ))
            .await
            .unwrap();
        webhook.name = "Renamed hook".to_string();

        let mut updated = webhook.update().await.unwrap();
        assert_eq!(updated.name, "Renamed hook");
        updated.delete().await.unwrap();
    }
}

/// Memberships, roles and API keys
mod access_tests {
    use super::*;

    fn role_link(id: &str) -> Value {
        json!({"sys": {"type": "Link", "linkType": "Role", "id": id}})
    }

    #[tokio::test]
    async fn test_space_membership_lifecycle() {
        let (server, client) = setup().await;
        mount_space(&server, "s1", 1).await;

        let membership = |version: u64, admin: bool| {
            json!({
                "sys": {"type": "SpaceMembership", "id": "m1", "version": version},
                "admin": admin,
                "roles": if admin { json!([]) } else { json!([role_link("r1")]) }
            })
        };

        Mock::given(method("POST"))
            .and(path("/spaces/s1/space_memberships"))
            .and(body_json(json!({
                "admin": false,
                "roles": [role_link("r1")],
                "email": "editor@example.com"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(membership(1, false)))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/spaces/s1/space_memberships/m1"))
            .and(header("X-Contentful-Version", "1"))
            .and(body_json(json!({"admin": true, "roles": []})))
            .respond_with(ResponseTemplate::new(200).set_body_json(membership(2, true)))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/spaces/s1/space_memberships/m1"))
            .and(header("X-Contentful-Version", "2"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let space = client.get_space("s1").await.unwrap();
        let mut created = space
            .create_space_membership(SpaceMembership::with_roles("editor@example.com", &["r1"]))
            .await
            .unwrap();
        assert_eq!(created.roles[0].id(), "r1");

        created.admin = true;
        created.roles.clear();
        let mut updated = created.update().await.unwrap();
        assert!(updated.admin);
        assert_eq!(updated.version(), Some(2));

        updated.delete().await.unwrap();
        assert!(updated.is_deleted());
    }

    #[tokio::test]
    async fn test_membership_without_access_fails_locally() {
        let (server, client) = setup().await;
        mount_space(&server, "s1", 1).await;

        let space = client.get_space("s1").await.unwrap();
        let err = space
            .create_space_membership(SpaceMembership::with_roles("nobody@example.com", &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
        assert_eq!(err.status(), None);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_role_lifecycle() {
        let (server, client) = setup().await;
        mount_space(&server, "s1", 1).await;

        let policy = json!({"effect": "allow", "actions": ["read"]});
        let role = |version: u64, name: &str| {
            json!({
                "sys": {"type": "Role", "id": "r1", "version": version},
                "name": name,
                "permissions": {"ContentModel": ["read"]},
                "policies": [policy.clone()]
            })
        };

        Mock::given(method("POST"))
            .and(path("/spaces/s1/roles"))
            .and(body_json(json!({
                "name": "Reader",
                "permissions": {"ContentModel": ["read"]},
                "policies": [{"effect": "allow", "actions": ["read"]}]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(role(1, "Reader")))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/spaces/s1/roles/r1"))
            .and(header("X-Contentful-Version", "1"))
            .and(body_json(json!({
                "name": "Viewer",
                "permissions": {"ContentModel": ["read"]},
                "policies": [{"effect": "allow", "actions": ["read"]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(role(2, "Viewer")))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/spaces/s1/roles/r1"))
            .and(header("X-Contentful-Version", "2"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let space = client.get_space("s1").await.unwrap();
        let mut created = space
            .create_role(
                Role::new("Reader")
                    .with_permission("ContentModel", json!(["read"]))
                    .with_policy(Policy {
                        effect: Effect::Allow,
                        actions: json!(["read"]),
                        constraint: None,
                    }),
            )
            .await
            .unwrap();
        assert_eq!(created.policies[0].effect, Effect::Allow);

        created.name = "Viewer".to_string();
        let mut updated = created.update().await.unwrap();
        assert_eq!(updated.name, "Viewer");

        updated.delete().await.unwrap();
    }

    #[tokio::test]
    async fn test_api_key_lifecycle() {
        let (server, client) = setup().await;
        mount_space(&server, "s1", 1).await;

        let key = |version: u64, name: &str| {
            json!({
                "sys": {"type": "ApiKey", "id": "k1", "version": version},
                "name": name,
                "description": "Public site",
                "accessToken": "delivery-token"
            })
        };

        Mock::given(method("POST"))
            .and(path("/spaces/s1/api_keys"))
            .and(body_json(json!({"name": "Website", "description": "Public site"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(key(1, "Website")))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/spaces/s1/api_keys/k1"))
            .and(header("X-Contentful-Version", "1"))
            .and(body_json(json!({"name": "Website v2", "description": "Public site"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(key(2, "Website v2")))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/spaces/s1/api_keys/k1"))
            .and(header("X-Contentful-Version", "2"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let space = client.get_space("s1").await.unwrap();
        let mut draft = ApiKey::new("Website").with_description("Public site");
        draft.access_token = Some("stale-token".to_string());

        let mut created = space.create_api_key(draft).await.unwrap();
        assert_eq!(created.access_token.as_deref(), Some("delivery-token"));
        assert_eq!(created.to_value().unwrap()["accessToken"], "delivery-token");

        created.name = "Website v2".to_string();
        let mut updated = created.update().await.unwrap();
        assert_eq!(updated.version(), Some(2));

        updated.delete().await.unwrap();
    }
}

/// Publish, archive and refresh verbs
mod lifecycle_tests {
    use super::*;

    fn asset_json(version: u64, title: &str) -> Value {
        json!({
            "sys": {"type": "Asset", "id": "a1", "version": version, "space": space_link("s1")},
            "fields": {"title": {"en-US": title}}
        })
    }

    #[tokio::test]
    async fn test_content_type_unpublish() {
        let (server, client) = setup().await;
        mount_space(&server, "s1", 1).await;

        let ct = |version: u64, published: Option<u64>| {
            let mut sys = json!({"type": "ContentType", "id": "post", "version": version});
            if let Some(p) = published {
                sys["publishedVersion"] = json!(p);
            }
            json!({"sys": sys, "name": "Post", "fields": []})
        };

        Mock::given(method("GET"))
            .and(path("/spaces/s1/content_types/post"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ct(2, Some(1))))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/spaces/s1/content_types/post/published"))
            .and(header("X-Contentful-Version", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ct(3, None)))
            .expect(1)
            .mount(&server)
            .await;

        let space = client.get_space("s1").await.unwrap();
        let published = space.get_content_type("post").await.unwrap();
        assert!(published.is_published());

        let draft = published.unpublish().await.unwrap();
        assert!(draft.is_draft());
        assert_eq!(draft.version(), Some(3));
    }

    #[tokio::test]
    async fn test_asset_publish_and_archive() {
        let (server, client) = setup().await;
        mount_space(&server, "s1", 1).await;

        Mock::given(method("GET"))
            .and(path("/spaces/s1/assets/a1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(asset_json(1, "Logo")))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/spaces/s1/assets/a1/published"))
            .and(header("X-Contentful-Version", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json({
                let mut published = asset_json(2, "Logo");
                published["sys"]["publishedVersion"] = json!(1);
                published
            }))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/spaces/s1/assets/a1/archived"))
            .and(header("X-Contentful-Version", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json({
                let mut archived = asset_json(3, "Logo");
                archived["sys"]["archivedVersion"] = json!(2);
                archived
            }))
            .mount(&server)
            .await;

        let space = client.get_space("s1").await.unwrap();
        let asset = space.get_asset("a1").await.unwrap();
        assert!(asset.is_draft());

        let published = asset.publish().await.unwrap();
        assert!(published.is_published());

        let archived = published.archive().await.unwrap();
        assert!(archived.is_archived());
        assert_eq!(archived.version(), Some(3));
    }

    #[tokio::test]
    async fn test_refresh_fetches_current_state() {
        let (server, client) = setup().await;
        mount_space(&server, "s1", 1).await;

        Mock::given(method("GET"))
            .and(path("/spaces/s1/assets/a1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(asset_json(1, "Logo")))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/spaces/s1/assets/a1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(asset_json(4, "New logo")))
            .mount(&server)
            .await;

        let space = client.get_space("s1").await.unwrap();
        let asset = space.get_asset("a1").await.unwrap();
        let fresh = asset.refresh().await.unwrap();

        assert_eq!(asset.version(), Some(1));
        assert_eq!(fresh.version(), Some(4));
        assert_eq!(fresh.title("en-US"), Some("New logo"));
        assert_eq!(fresh.path(), asset.path());
    }
}
