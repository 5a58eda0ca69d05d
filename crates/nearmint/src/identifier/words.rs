pub(crate) const ADJECTIVES: [&str; 80] = [
    "cool", "smart", "fast", "bright", "happy", "lucky", "brave", "wise", "kind", "bold",
    "quick", "sharp", "calm", "wild", "free", "pure", "true", "real", "deep", "high",
    "low", "big", "small", "new", "old", "young", "fresh", "clean", "clear", "soft",
    "hard", "warm", "cold", "hot", "sweet", "sour", "bitter", "spicy", "smooth", "rough",
    "quiet", "loud", "shiny", "dark", "light", "heavy", "strong", "weak", "rich", "poor",
    "epic", "awesome", "amazing", "incredible", "fantastic", "wonderful", "perfect", "super", "mega", "ultra",
    "crypto", "nft", "web3", "defi", "blockchain", "digital", "virtual", "cyber", "tech", "future",
    "alpha", "beta", "gamma", "delta", "omega", "sigma", "zeta", "theta", "lambda", "phi",
];

pub(crate) const NOUNS: [&str; 190] = [
    "cat", "dog", "bird", "fish", "lion", "tiger", "bear", "wolf", "fox", "deer",
    "rabbit", "mouse", "rat", "snake", "frog", "turtle", "crab", "shark", "whale", "dolphin",
    "eagle", "hawk", "owl", "crow", "duck", "goose", "swan", "penguin", "parrot", "peacock",
    "star", "moon", "sun", "cloud", "rain", "snow", "wind", "storm", "thunder", "lightning",
    "river", "lake", "ocean", "mountain", "forest", "desert", "island", "beach", "cave", "cliff",
    "tree", "flower", "grass", "rock", "stone", "gem", "crystal", "diamond", "gold", "silver",
    "fire", "water", "earth", "air", "ice", "steam", "smoke", "dust", "sand", "mud",
    "king", "queen", "prince", "princess", "knight", "wizard", "witch", "dragon", "unicorn", "phoenix",
    "hero", "warrior", "hunter", "archer", "sword", "shield", "armor", "helmet", "crown", "throne",
    "book", "pen", "paper", "ink", "paint", "brush", "canvas", "art", "music", "song",
    "dream", "hope", "love", "joy", "peace", "freedom", "truth", "justice", "honor", "glory",
    "ape", "dude", "guy", "bro", "sis", "kid", "boy", "girl", "man", "woman",
    "hacker", "coder", "dev", "pro", "guru", "master", "boss", "chief", "leader", "captain",
    "ninja", "samurai", "viking", "pirate", "spy", "agent", "detective", "sheriff", "ranger", "scout",
    "gamer", "player", "streamer", "youtuber", "influencer", "creator", "artist", "designer", "builder", "maker",
    "trader", "investor", "hodler", "miner", "validator", "node", "wallet", "token", "coin", "nft",
    "planet", "galaxy", "universe", "cosmos", "nebula", "comet", "asteroid", "meteor", "blackhole", "wormhole",
    "robot", "android", "cyborg", "ai", "bot", "drone", "satellite", "spaceship", "rocket", "ufo",
    "ghost", "vampire", "zombie", "alien", "monster", "beast", "creature", "spirit", "soul", "mind",
];

pub(crate) const SUFFIXES: [&str; 29] = [
    "er", "or", "ist", "ian", "ly", "ful", "less", "able", "ible", "ous",
    "ious", "eous", "al", "ial", "ic", "ical", "ive", "ative", "itive", "ent",
    "ant", "ing", "ed", "en", "ish", "like", "y", "ey", "ie",
];

pub(crate) const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

pub(crate) const FILLERS: [char; 5] = ['x', 'z', 'q', 'v', 'w'];
