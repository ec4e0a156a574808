// Copyright © 2024 Pathway


mod test_file_kv;
mod test_memory_kv;
