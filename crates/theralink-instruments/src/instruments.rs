pub mod daily_wellness;
