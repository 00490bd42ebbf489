//! Job API tests against a local HTTP double.
//!
//! Every mock requires the JSON content type and the `apiKey` authorization
//! header, so a request missing either falls through to mockito's 501.

use std::time::Duration;

use ionq_client::{
    CircuitInput, Context, CreateJobRequest, DeleteManyJobsRequest, IonqClient, IonqError, Job,
    JobInput, JobStatus, ListJobsRequest, ListJobsResponse, NoiseInput,
};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;

const API_KEY: &str = "blahblahnotreal";

async fn setup() -> (ServerGuard, IonqClient) {
    let server = Server::new_async().await;
    let client = IonqClient::new(format!("{}/v0.3", server.url()), API_KEY).unwrap();
    (server, client)
}

fn api_mock(server: &mut ServerGuard, method: &str, path: &str) -> Mock {
    server
        .mock(method, format!("/v0.3/{path}").as_str())
        .match_header("authorization", format!("apiKey {API_KEY}").as_str())
        .match_header("content-type", "application/json")
}

fn ctx() -> Context {
    Context::with_timeout(Duration::from_secs(5))
}

fn sample_job(id: &str, status: &str) -> Job {
    serde_json::from_value(json!({
        "id": id,
        "name": "hadamard-3",
        "status": status,
        "target": "simulator",
        "noise": {"model": "ideal"},
        "metadata": {"custom_key": "demo"},
        "shots": 1000,
        "gate_counts": {"1q": 3, "2q": 0},
        "qubits": 3,
        "request": 1_717_000_000u64,
        "children": [],
        "results_url": format!("/v0.3/jobs/{id}/results"),
        "circuits": 1
    }))
    .unwrap()
}

// -- list --

#[tokio::test]
async fn test_list_jobs_success() {
    let (mut server, client) = setup().await;
    let page = ListJobsResponse {
        jobs: vec![
            sample_job("cb6d30f7-63c2-4860-9f0e-ad15cd4e2379", "completed"),
            sample_job("e759e916-af08-4716-9b3d-15bd1bf65ffe", "running"),
        ],
        next: Some("f759e916-af08-4716-9b3d-15bd1bf65ffe".into()),
    };

    let mock = api_mock(&mut server, "GET", "jobs")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("id".into(), "cb6d30f7-63c2-4860-9f0e-ad15cd4e2379".into()),
            Matcher::UrlEncoded("id".into(), "e759e916-af08-4716-9b3d-15bd1bf65ffe".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::to_string(&page).unwrap())
        .create_async()
        .await;

    let request = ListJobsRequest::new().with_ids([
        "cb6d30f7-63c2-4860-9f0e-ad15cd4e2379",
        "e759e916-af08-4716-9b3d-15bd1bf65ffe",
    ]);
    let resp = client.list_jobs(&ctx(), &request).await.unwrap();

    assert_eq!(resp.status, 200);
    assert!(resp.is_success());
    assert_eq!(resp.response, page);
    assert_eq!(
        resp.response.next_cursor(),
        Some("f759e916-af08-4716-9b3d-15bd1bf65ffe")
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_jobs_with_filters() {
    let (mut server, client) = setup().await;
    let mock = api_mock(&mut server, "GET", "jobs")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("id".into(), "cb6d30f7-63c2-4860-9f0e-ad15cd4e2379".into()),
            Matcher::UrlEncoded("status".into(), "completed".into()),
            Matcher::UrlEncoded("limit".into(), "4".into()),
            Matcher::UrlEncoded("next".into(), "f759e916-af08-4716-9b3d-15bd1bf65ffe".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"jobs": []}"#)
        .create_async()
        .await;

    let request = ListJobsRequest::new()
        .with_ids(["cb6d30f7-63c2-4860-9f0e-ad15cd4e2379"])
        .with_status(JobStatus::Completed)
        .with_limit(4)
        .with_next("f759e916-af08-4716-9b3d-15bd1bf65ffe");
    let resp = client.list_jobs(&ctx(), &request).await.unwrap();

    assert_eq!(resp.status, 200);
    assert!(resp.response.jobs.is_empty());
    assert_eq!(resp.response.next_cursor(), None);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_jobs_error_status_returns_body() {
    let (mut server, client) = setup().await;
    let mock = api_mock(&mut server, "GET", "jobs")
        .with_status(400)
        .with_body(r#"{"error": "Bad Request", "message": "invalid limit"}"#)
        .create_async()
        .await;

    let resp = client
        .list_jobs(&ctx(), &ListJobsRequest::new())
        .await
        .unwrap();

    assert_eq!(resp.status, 400);
    assert!(!resp.is_success());
    assert!(resp.response.jobs.is_empty());
    let remote = resp.remote_error().unwrap();
    assert_eq!(remote.message.as_deref(), Some("invalid limit"));
    mock.assert_async().await;
}

// -- create --

#[tokio::test]
async fn test_create_job_sends_sparse_body() {
    let (mut server, client) = setup().await;
    let mock = api_mock(&mut server, "POST", "jobs")
        .match_body(Matcher::Json(json!({
            "shots": 1000,
            "noise": {"model": "ideal"},
            "input": {
                "qubits": 2,
                "format": "ionq.circuit.v0",
                "circuit": [
                    {"gate": "h", "target": 0},
                    {"gate": "cnot", "control": 0, "target": 1}
                ]
            }
        })))
        .with_status(200)
        .with_body(r#"{"id": "617a1f8b-59d4-435d-aa33-695433d7155e", "status": "ready"}"#)
        .create_async()
        .await;

    let input = JobInput::new(2)
        .push(CircuitInput::new("h").with_target(0))
        .push(CircuitInput::new("cnot").with_control(0).with_target(1));
    let request = CreateJobRequest::new(input)
        .with_shots(1000)
        .with_noise(NoiseInput::model("ideal"));

    let resp = client.create_job(&ctx(), &request).await.unwrap();

    assert_eq!(resp.status, 200);
    assert_eq!(resp.response.id, "617a1f8b-59d4-435d-aa33-695433d7155e");
    assert_eq!(resp.response.status, Some(JobStatus::Ready));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_job_bad_request_is_not_an_error() {
    let (mut server, client) = setup().await;
    let mock = api_mock(&mut server, "POST", "jobs")
        .with_status(400)
        .with_body(r#"{"error": {"type": "ValidationError", "message": "qubits out of range"}}"#)
        .create_async()
        .await;

    let resp = client
        .create_job(&ctx(), &CreateJobRequest::default())
        .await
        .unwrap();

    assert_eq!(resp.status, 400);
    assert!(resp.response.id.is_empty());
    let remote = resp.remote_error().unwrap();
    assert_eq!(remote.code.as_deref(), Some("ValidationError"));
    assert_eq!(remote.message.as_deref(), Some("qubits out of range"));
    mock.assert_async().await;
}

// -- get --

#[tokio::test]
async fn test_get_job_decodes_record() {
    let (mut server, client) = setup().await;
    let job = sample_job("aa54e783-0a9b-4f73-b4b8-fb1a2c4b2a6e", "completed");
    let mock = api_mock(&mut server, "GET", "jobs/aa54e783-0a9b-4f73-b4b8-fb1a2c4b2a6e")
        .with_status(200)
        .with_body(serde_json::to_string(&job).unwrap())
        .create_async()
        .await;

    let resp = client
        .get_job(&ctx(), "aa54e783-0a9b-4f73-b4b8-fb1a2c4b2a6e")
        .await
        .unwrap();

    assert_eq!(resp.status, 200);
    assert_eq!(resp.response, job);
    assert!(resp.response.is_completed());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_job_not_found() {
    let (mut server, client) = setup().await;
    let mock = api_mock(&mut server, "GET", "jobs/missing")
        .with_status(404)
        .with_body(r#"{"error": "Not Found", "message": "job missing not found"}"#)
        .create_async()
        .await;

    let resp = client.get_job(&ctx(), "missing").await.unwrap();

    assert_eq!(resp.status, 404);
    assert_eq!(resp.response, Job::default());
    assert_eq!(resp.remote_error().unwrap().code.as_deref(), Some("Not Found"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_job_malformed_body_is_error() {
    let (mut server, client) = setup().await;
    let _mock = api_mock(&mut server, "GET", "jobs/abc")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let err = client.get_job(&ctx(), "abc").await.unwrap_err();
    assert!(matches!(err, IonqError::Json(_)));
}

#[tokio::test]
async fn test_empty_body_is_error() {
    let (mut server, client) = setup().await;
    let _get = api_mock(&mut server, "GET", "jobs/abc")
        .with_status(200)
        .with_body("")
        .create_async()
        .await;
    let _delete = api_mock(&mut server, "DELETE", "jobs/abc")
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let err = client.get_job(&ctx(), "abc").await.unwrap_err();
    assert!(matches!(err, IonqError::Json(_)));

    let err = client.delete_job(&ctx(), "abc").await.unwrap_err();
    assert!(matches!(err, IonqError::Json(_)));
}

// -- output --

#[tokio::test]
async fn test_get_job_output() {
    let (mut server, client) = setup().await;
    let mock = api_mock(&mut server, "GET", "jobs/abc/results")
        .with_status(200)
        .with_body(r#"{"0": 0.5, "1": 0.5}"#)
        .create_async()
        .await;

    let resp = client.get_job_output(&ctx(), "abc").await.unwrap();

    assert_eq!(resp.status, 200);
    let output = resp.response;
    assert_eq!(output.len(), 2);
    assert_eq!(output.probability(0), 0.5);
    assert_eq!(output.probability(1), 0.5);
    assert!((output.total() - 1.0).abs() < f32::EPSILON);
    mock.assert_async().await;
}

// -- delete / cancel --

#[tokio::test]
async fn test_delete_job() {
    let (mut server, client) = setup().await;
    let mock = api_mock(&mut server, "DELETE", "jobs/abc")
        .with_status(200)
        .with_body(r#"{"id": "abc", "status": "deleted"}"#)
        .create_async()
        .await;

    let resp = client.delete_job(&ctx(), "abc").await.unwrap();

    assert_eq!(resp.status, 200);
    assert_eq!(resp.response.id, "abc");
    assert_eq!(resp.response.status, Some(JobStatus::Deleted));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_many_jobs() {
    let (mut server, client) = setup().await;
    let mock = api_mock(&mut server, "DELETE", "jobs")
        .match_body(Matcher::Json(json!({"ids": ["a", "b", "c"]})))
        .with_status(200)
        .with_body(r#"{"ids": ["a", "b", "c"], "status": "deleted"}"#)
        .create_async()
        .await;

    let resp = client
        .delete_many_jobs(&ctx(), &DeleteManyJobsRequest::new(["a", "b", "c"]))
        .await
        .unwrap();

    assert_eq!(resp.status, 200);
    assert_eq!(resp.response.ids, vec!["a", "b", "c"]);
    assert_eq!(resp.response.status, Some(JobStatus::Deleted));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_cancel_then_get_reports_canceled() {
    let (mut server, client) = setup().await;
    let cancel = api_mock(&mut server, "PUT", "jobs/abc/status/cancel")
        .with_status(200)
        .with_body(r#"{"id": "abc", "status": "canceled"}"#)
        .create_async()
        .await;
    let get = api_mock(&mut server, "GET", "jobs/abc")
        .with_status(200)
        .with_body(r#"{"id": "abc", "status": "canceled"}"#)
        .create_async()
        .await;

    let resp = client.cancel_job(&ctx(), "abc").await.unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.response.status, Some(JobStatus::Canceled));

    let resp = client.get_job(&ctx(), "abc").await.unwrap();
    assert_eq!(resp.response.status, Some(JobStatus::Canceled));
    assert!(resp.response.is_terminal());

    cancel.assert_async().await;
    get.assert_async().await;
}

// -- context --

#[tokio::test]
async fn test_expired_deadline_sends_nothing() {
    let (mut server, client) = setup().await;
    let mock = api_mock(&mut server, "GET", "jobs/abc")
        .with_status(200)
        .with_body(r#"{"id": "abc"}"#)
        .expect(0)
        .create_async()
        .await;

    let ctx = Context::with_timeout(Duration::ZERO);

    let err = client.get_job(&ctx, "abc").await.unwrap_err();
    assert!(matches!(err, IonqError::DeadlineExceeded));

    let err = client
        .create_job(&ctx, &CreateJobRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, IonqError::DeadlineExceeded));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_cancelled_context_sends_nothing() {
    let (mut server, client) = setup().await;
    let mock = api_mock(&mut server, "PUT", "jobs/abc/status/cancel")
        .expect(0)
        .create_async()
        .await;

    let (ctx, handle) = Context::background().with_cancel();
    handle.cancel();

    let err = client.cancel_job(&ctx, "abc").await.unwrap_err();
    assert!(matches!(err, IonqError::Cancelled));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_calls_share_client() {
    let (mut server, client) = setup().await;
    let mock = api_mock(&mut server, "GET", "jobs/abc")
        .with_status(200)
        .with_body(r#"{"id": "abc", "status": "running"}"#)
        .expect(2)
        .create_async()
        .await;

    let other = client.clone();
    let ctx = ctx();
    let (a, b) = tokio::join!(client.get_job(&ctx, "abc"), other.get_job(&ctx, "abc"));

    assert_eq!(a.unwrap().response.status, Some(JobStatus::Running));
    assert_eq!(b.unwrap().response.status, Some(JobStatus::Running));
    mock.assert_async().await;
}
