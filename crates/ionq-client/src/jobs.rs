//! Job operations: list, create, inspect, fetch results, cancel, delete.
//!
//! Each call is one HTTP exchange. The returned [`ApiResponse`] pairs the
//! decoded body with the status code; callers decide what a non-2xx means.

use reqwest::Method;
use tracing::{debug, instrument};

use crate::client::IonqClient;
use crate::context::Context;
use crate::error::IonqResult;
use crate::response::ApiResponse;
use crate::types::{
    CancelJobResponse, CreateJobRequest, CreateJobResponse, DeleteJobResponse,
    DeleteManyJobsRequest, DeleteManyJobsResponse, Job, JobOutput, ListJobsRequest,
    ListJobsResponse,
};

/// Collection path, relative to the endpoint.
pub const JOBS_PATH: &str = "jobs";

fn job_path(job_id: &str) -> String {
    format!("{JOBS_PATH}/{job_id}")
}

impl IonqClient {
    /// `GET /jobs`: one page of jobs matching `request`.
    ///
    /// Pagination is not followed; pass the returned
    /// [`next_cursor`](ListJobsResponse::next_cursor) back in to continue.
    #[instrument(skip(self, ctx, request), fields(ids = request.ids.len()))]
    pub async fn list_jobs(
        &self,
        ctx: &Context,
        request: &ListJobsRequest,
    ) -> IonqResult<ApiResponse<ListJobsResponse>> {
        debug!("Listing IonQ jobs");
        let builder = self
            .request(Method::GET, JOBS_PATH)
            .query(&request.query_pairs());
        self.execute(ctx, builder).await
    }

    /// `POST /jobs`: submit a job.
    #[instrument(skip(self, ctx, request), fields(target = ?request.target))]
    pub async fn create_job(
        &self,
        ctx: &Context,
        request: &CreateJobRequest,
    ) -> IonqResult<ApiResponse<CreateJobResponse>> {
        debug!("Submitting IonQ job");
        let builder = self.request(Method::POST, JOBS_PATH).json(request);
        self.execute(ctx, builder).await
    }

    /// `GET /jobs/{id}`: the job record as the service currently sees it.
    #[instrument(skip(self, ctx))]
    pub async fn get_job(&self, ctx: &Context, job_id: &str) -> IonqResult<ApiResponse<Job>> {
        debug!("Getting IonQ job {}", job_id);
        let builder = self.request(Method::GET, &job_path(job_id));
        self.execute(ctx, builder).await
    }

    /// `GET /jobs/{id}/results`: the output probability distribution.
    ///
    /// Only meaningful once the job is `completed`.
    #[instrument(skip(self, ctx))]
    pub async fn get_job_output(
        &self,
        ctx: &Context,
        job_id: &str,
    ) -> IonqResult<ApiResponse<JobOutput>> {
        debug!("Getting IonQ results for job {}", job_id);
        let builder = self.request(Method::GET, &format!("{}/results", job_path(job_id)));
        self.execute(ctx, builder).await
    }

    /// `DELETE /jobs/{id}`.
    #[instrument(skip(self, ctx))]
    pub async fn delete_job(
        &self,
        ctx: &Context,
        job_id: &str,
    ) -> IonqResult<ApiResponse<DeleteJobResponse>> {
        debug!("Deleting IonQ job {}", job_id);
        let builder = self.request(Method::DELETE, &job_path(job_id));
        self.execute(ctx, builder).await
    }

    /// `DELETE /jobs` with `{"ids": [...]}`.
    #[instrument(skip(self, ctx, request), fields(count = request.ids.len()))]
    pub async fn delete_many_jobs(
        &self,
        ctx: &Context,
        request: &DeleteManyJobsRequest,
    ) -> IonqResult<ApiResponse<DeleteManyJobsResponse>> {
        debug!("Deleting {} IonQ jobs", request.ids.len());
        let builder = self.request(Method::DELETE, JOBS_PATH).json(request);
        self.execute(ctx, builder).await
    }

    /// `PUT /jobs/{id}/status/cancel`.
    #[instrument(skip(self, ctx))]
    pub async fn cancel_job(
        &self,
        ctx: &Context,
        job_id: &str,
    ) -> IonqResult<ApiResponse<CancelJobResponse>> {
        debug!("Cancelling IonQ job {}", job_id);
        let builder = self.request(Method::PUT, &format!("{}/status/cancel", job_path(job_id)));
        self.execute(ctx, builder).await
    }
}
