pub mod fake_remote;
