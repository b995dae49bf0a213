#![cfg(unix)]

mod helpers;
