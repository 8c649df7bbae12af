#![no_main]

use std::convert::Infallible;

use futures_util::stream::iter;
use libfuzzer_sys::fuzz_target;
use tokio::runtime;
use upload_filter::bytes::Bytes;
use upload_filter::{Config, UploadFilter};

fuzz_target!(|data: &[u8]| {
    // The first byte picks the chunk size so splits land everywhere.
    let (size, body) = match data.split_first() {
        Some((size, body)) => (usize::from(*size).max(1), body),
        None => return,
    };

    let chunks = body
        .chunks(size)
        .map(|chunk| Result::<Bytes, Infallible>::Ok(Bytes::copy_from_slice(chunk)))
        .collect::<Vec<_>>();

    let config = Config::new().file_field("file");
    let mut filter = UploadFilter::new(iter(chunks), Some("multipart/form-data; boundary=X-BOUNDARY"), config);

    let rt = runtime::Builder::new_current_thread().build().expect("runtime");
    rt.block_on(async {
        let mut relayed = 0;
        while let Ok(Some(chunk)) = filter.chunk().await {
            relayed += chunk.len();
        }
        assert!(relayed <= body.len());
    })
});
