mod batch_tests;
mod pipeline_tests;
