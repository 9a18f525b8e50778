use blobseal::{open, seal, OVERHEAD};

fn main() {
    use rand_core::{OsRng, RngCore};
    let mut key = [0u8; 32];
    let plaintext = b"hello world";

    OsRng.fill_bytes(&mut key);

    // encrypt

    // note: the blob carries the nonce in front of the ciphertext and the
    // tag behind it, so the key is all that is needed to open it again.
    let blob = seal(plaintext, &key).expect("sealing should succeed");
    assert_eq!(blob.len(), plaintext.len() + OVERHEAD);

    println!("blob: {:02x?}", blob);

    // decrypt
    let plaintext = open(&blob, &key).expect("decryption should succeed");

    println!("plaintext: {:02x?}", plaintext);
}
