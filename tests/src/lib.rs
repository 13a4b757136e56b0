#![cfg(test)]


mod orchestration;
mod polling;
