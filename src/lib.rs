pub mod toss;
