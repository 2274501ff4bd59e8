use super::*;
use std::time::Duration;
use tokio_stream::StreamExt;

#[derive(Clone, Debug, PartialEq)]
enum TestMsg {
    Tick,
    Timer,
    Value(i32),
    Quit,
}

mod subscription_ext;
