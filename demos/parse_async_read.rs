use tokio::io::AsyncRead;
use upload_filter::{Config, UploadFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate an `AsyncRead` and its content type from somewhere e.g. server request body.
    let (reader, content_type) = get_async_reader_from_somewhere().await;

    let config = Config::new().file_field("File Field");
    let mut filter = UploadFilter::with_reader(reader, Some(content_type), config);

    // Only the file field's content comes out of the filter.
    while let Some(chunk) = filter.chunk().await? {
        println!("Chunk: {:?}", chunk);
    }

    println!("File: {:?}", filter.file_info());

    for (name, value) in filter.form().iter() {
        println!("Field {:?} = {:?}", name, value);
    }

    Ok(())
}

async fn get_async_reader_from_somewhere() -> (impl AsyncRead + Unpin + Send, &'static str) {
    let data = "--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"My Field\"\r\n\r\nabcd\r\n--X-BOUNDARY\r\nContent-Disposition: form-data; name=\"File Field\"; filename=\"a-text-file.txt\"\r\nContent-Type: text/plain\r\n\r\nHello world\nHello\r\nWorld\rAgain\r\n--X-BOUNDARY--\r\n";

    (data.as_bytes(), "multipart/form-data; boundary=X-BOUNDARY")
}
