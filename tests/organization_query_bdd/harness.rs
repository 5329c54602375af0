//! Wiremock responses for the organization query BDD tests.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::runtime::SharedRuntime;

const PAGE_SIZE: u64 = 10;

fn organization_json(login: &str, public_repos: u64) -> serde_json::Value {
    json!({
        "login": login,
        "name": null,
        "avatar_url": format!("https://avatars.githubusercontent.com/{login}"),
        "description": null,
        "public_repos": public_repos,
        "html_url": format!("https://github.com/{login}")
    })
}

/// Repositories `first_id..first_id + count`; stars ascend with the id.
fn repositories_json(login: &str, first_id: u64, count: u64) -> Vec<serde_json::Value> {
    (first_id..first_id + count)
        .map(|id| {
            json!({
                "id": id,
                "name": format!("repo-{id}"),
                "full_name": format!("{login}/repo-{id}"),
                "html_url": format!("https://github.com/{login}/repo-{id}"),
                "description": null,
                "stargazers_count": id * 10,
                "forks_count": id,
                "updated_at": "2024-05-01T12:00:00Z",
                "language": "Rust",
                "topics": []
            })
        })
        .collect()
}

fn rate_limit_response() -> ResponseTemplate {
    ResponseTemplate::new(403)
        .set_body_json(json!({
            "message": "API rate limit exceeded for 203.0.113.7",
            "documentation_url": "https://docs.github.com/rest/rate-limit"
        }))
        .insert_header("X-RateLimit-Limit", "60")
        .insert_header("X-RateLimit-Remaining", "0")
        .insert_header("X-RateLimit-Reset", "1700000000")
}

/// Mocks for `login` and every page of its `total` repositories.
///
/// When `token` is given, only requests carrying it are answered this way.
fn organization_mocks(login: &str, total: u64, token: Option<&str>) -> Vec<Mock> {
    let authorised = |mock: wiremock::MockBuilder| match token {
        Some(value) => mock.and(header("authorization", format!("Bearer {value}").as_str())),
        None => mock,
    };

    let mut mocks = vec![
        authorised(Mock::given(method("GET")).and(path(format!("/orgs/{login}"))))
            .respond_with(ResponseTemplate::new(200).set_body_json(organization_json(login, total)))
            .with_priority(1),
    ];

    let pages = total.div_ceil(PAGE_SIZE).max(1);
    for page in 1..=pages {
        let first_id = (page - 1) * PAGE_SIZE + 1;
        let count = total.saturating_sub(first_id - 1).min(PAGE_SIZE);
        mocks.push(
            authorised(
                Mock::given(method("GET"))
                    .and(path(format!("/orgs/{login}/repos")))
                    .and(query_param("page", page.to_string())),
            )
            .respond_with(
                ResponseTemplate::new(200).set_body_json(repositories_json(login, first_id, count)),
            )
            .with_priority(1),
        );
    }
    mocks
}

fn mount_all(runtime: &SharedRuntime, server: &MockServer, mocks: Vec<Mock>) {
    for mock in mocks {
        runtime.block_on(mock.mount(server));
    }
}

/// Serves `login` with `total` repositories to anyone.
pub(crate) fn mount_organization(
    runtime: &SharedRuntime,
    server: &MockServer,
    login: &str,
    total: u64,
) {
    mount_all(runtime, server, organization_mocks(login, total, None));
}

/// Answers 404 for `login`.
pub(crate) fn mount_missing_organization(runtime: &SharedRuntime, server: &MockServer, login: &str) {
    let mock = Mock::given(method("GET"))
        .and(path(format!("/orgs/{login}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest/orgs/orgs#get-an-organization"
        })));
    runtime.block_on(mock.mount(server));
}

/// Rate limits anonymous requests for `login`; requests bearing `token` see
/// `total` repositories.
pub(crate) fn mount_rate_limited(
    runtime: &SharedRuntime,
    server: &MockServer,
    login: &str,
    token: &str,
    total: u64,
) {
    mount_all(runtime, server, organization_mocks(login, total, Some(token)));

    let anonymous = Mock::given(method("GET"))
        .and(path(format!("/orgs/{login}")))
        .respond_with(rate_limit_response())
        .with_priority(5);
    runtime.block_on(anonymous.mount(server));
}
