mod auth_flow_tests;
mod complaint_tests;
mod customer_tests;
mod follow_up_tests;
