mod helpers;

mod access_request_test;
mod company_test;
mod exchange_rate_test;
mod pipeline_test;
mod stage_test;
mod visibility_test;
