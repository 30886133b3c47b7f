mod indexing_run;
mod store_lifecycle;
