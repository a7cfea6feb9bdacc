pub mod classify;
pub mod cli {
    pub mod parser;
}
pub mod config;
pub mod github {
    pub mod issues;
    pub mod search;
}
pub mod output;
pub mod readme;
pub mod render;
pub mod run;
pub mod stats;
