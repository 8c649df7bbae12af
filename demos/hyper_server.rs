use std::{convert::Infallible, net::SocketAddr};

use bytes::Bytes;
use futures_util::StreamExt;
use http_body_util::{BodyStream, Full};
use hyper::{body::Incoming, Request, Response, StatusCode};
use upload_filter::{Config, UploadFilter};

// A handler for incoming requests.
async fn handle(req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();

    // Convert the body into a stream of data frames.
    let body_stream = BodyStream::new(body)
        .filter_map(|result| async move { result.map(|frame| frame.into_data().ok()).transpose() });

    // Only the "upload" field is relayed, every other field lands in the form.
    let config = Config::new().file_field("upload");
    let mut filter = UploadFilter::from_headers(body_stream, &parts.headers, config);

    match store_upload(&mut filter).await {
        Ok(len) => {
            println!("Form: {:?}", filter.form());
            println!("File: {:?}, {} bytes", filter.file_info(), len);

            if !filter.is_complete() {
                return Ok(Response::builder()
                    .status(StatusCode::BAD_REQUEST)
                    .body(Full::from("TRUNCATED UPLOAD"))
                    .unwrap());
            }

            Ok(Response::new(Full::from("Success")))
        }
        Err(err) => Ok(Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .body(Full::from(format!("INTERNAL SERVER ERROR: {}", err)))
            .unwrap()),
    }
}

// Consume the file content chunk by chunk, e.g. write it to disk.
async fn store_upload(filter: &mut UploadFilter<'_>) -> upload_filter::Result<usize> {
    let mut file_bytes_len = 0;

    while let Some(chunk) = filter.chunk().await? {
        file_bytes_len += chunk.len();
    }

    Ok(file_bytes_len)
}

#[tokio::main]
async fn main() {
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    println!("Server running at: {}", addr);

    let service = hyper::service::service_fn(handle);

    loop {
        let (socket, _remote_addr) = listener.accept().await.unwrap();
        let socket = hyper_util::rt::TokioIo::new(socket);
        tokio::spawn(async move {
            if let Err(e) = hyper::server::conn::http1::Builder::new()
                .serve_connection(socket, service)
                .await
            {
                eprintln!("server error: {}", e);
            }
        });
    }
}
